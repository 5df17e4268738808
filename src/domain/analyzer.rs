//! Analyzer orchestration: trade file -> price lookups -> ordered listings.
//!
//! Each listing loads the trade file through a [`TradePort`], resolves one
//! quote per trade (two for returns) through a [`QuotePort`], and sorts the
//! result. Quote lookups may fan out across a rayon pool `concurrency` threads
//! wide; results are always collected by input index, so the output order
//! depends only on the sort, never on which fetch finished first.

use crate::domain::calendar::{self, DAYS_PER_YEAR};
use crate::domain::error::AnalyzerError;
use crate::domain::ordering::{sort_by_annualized_return, sort_by_price};
use crate::domain::quote::{PriceField, PriceQuote};
use crate::domain::returns::AnnualizedReturn;
use crate::domain::trade::TradeRecord;
use crate::ports::quote_port::QuotePort;
use crate::ports::trade_port::TradePort;
use chrono::NaiveDate;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::io;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_LOOKBACK_DAYS: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerSettings {
    /// Width of the trailing quote window, in calendar days before the
    /// requested date.
    pub lookback_days: u32,
    /// Holding period used by the returns listing.
    pub years: u32,
    /// Maximum number of quote lookups in flight at once.
    pub concurrency: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            years: 1,
            concurrency: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct QuoteRequest {
    symbol: String,
    date: NaiveDate,
    field: PriceField,
}

pub struct StockAnalyzer<'a> {
    trades: &'a dyn TradePort,
    quotes: &'a dyn QuotePort,
    settings: AnalyzerSettings,
}

impl<'a> StockAnalyzer<'a> {
    pub fn new(
        trades: &'a dyn TradePort,
        quotes: &'a dyn QuotePort,
        settings: AnalyzerSettings,
    ) -> Self {
        Self {
            trades,
            quotes,
            settings,
        }
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Symbols of every trade, in file order, duplicates included.
    pub fn list_symbols(&self, file: &Path) -> Result<Vec<String>, AnalyzerError> {
        let trades = self.load(file)?;
        Ok(trades.into_iter().map(|t| t.symbol).collect())
    }

    /// Symbols ordered by ascending `field` price on `date` (or the latest
    /// trading day inside the lookback window).
    pub fn list_symbols_by_ascending_price(
        &self,
        file: &Path,
        date: &str,
        field: PriceField,
    ) -> Result<Vec<String>, AnalyzerError> {
        let end = calendar::parse_date(date)?;
        let trades = self.load(file)?;

        let requests: Vec<QuoteRequest> = trades
            .iter()
            .map(|t| QuoteRequest {
                symbol: t.symbol.clone(),
                date: end,
                field,
            })
            .collect();

        let mut quotes = self.fetch_all(&requests)?;
        sort_by_price(&mut quotes, field);
        Ok(quotes.into_iter().map(|q| q.symbol).collect())
    }

    /// Per-trade returns between `date - 365 * years` and `date`, both at the
    /// closing price, sorted by descending annualized return.
    pub fn compute_annualized_returns(
        &self,
        file: &Path,
        date: &str,
    ) -> Result<Vec<AnnualizedReturn>, AnalyzerError> {
        let years = self.settings.years;
        if years == 0 {
            return Err(AnalyzerError::InvalidHoldingPeriod { years });
        }

        let end = calendar::parse_date(date)?;
        let holding_days = i64::from(years) * DAYS_PER_YEAR;
        let start = calendar::shift_back(end, holding_days)
            .ok_or(AnalyzerError::InvalidHoldingPeriod { years })?;
        let trades = self.load(file)?;

        let requests: Vec<QuoteRequest> = trades
            .iter()
            .flat_map(|t| {
                [start, end].map(|d| QuoteRequest {
                    symbol: t.symbol.clone(),
                    date: d,
                    field: PriceField::Close,
                })
            })
            .collect();

        let quotes = self.fetch_all(&requests)?;

        let mut returns = Vec::with_capacity(trades.len());
        for (trade, pair) in trades.iter().zip(quotes.chunks_exact(2)) {
            let (purchase, current) = (&pair[0], &pair[1]);
            let r = AnnualizedReturn::compute(&trade.symbol, purchase.close, current.close, years)?;
            debug!(
                symbol = %r.symbol,
                purchase = purchase.close,
                current = current.close,
                annualized = r.annualized_return,
                "Computed return"
            );
            returns.push(r);
        }

        sort_by_annualized_return(&mut returns);
        Ok(returns)
    }

    /// The candle `field` reads for `symbol` on `date`, falling back to the
    /// trailing lookback window when `date` itself has no trading.
    pub fn quote_on(
        &self,
        symbol: &str,
        date: NaiveDate,
        field: PriceField,
    ) -> Result<PriceQuote, AnalyzerError> {
        let lookback = i64::from(self.settings.lookback_days);
        let start = calendar::shift_back(date, lookback).ok_or_else(|| {
            AnalyzerError::malformed_date(&date.to_string(), "lookback window is out of range")
        })?;

        let window = self.quotes.fetch_window(symbol, start, date)?;
        let picked = field
            .select(&window)
            .ok_or_else(|| AnalyzerError::NoQuotes {
                symbol: symbol.to_string(),
                start,
                end: date,
            })?;

        // The provider may echo a different ticker casing; listings report the
        // symbol as written in the trade file.
        Ok(PriceQuote {
            symbol: symbol.to_string(),
            ..picked.clone()
        })
    }

    fn load(&self, file: &Path) -> Result<Vec<TradeRecord>, AnalyzerError> {
        let trades = self.trades.load_trades(file)?;
        info!(file = %file.display(), trades = trades.len(), "Loaded trades");
        Ok(trades)
    }

    /// Resolve every request, in input order. With `concurrency > 1` the
    /// lookups run on a dedicated rayon pool of that width; the first error
    /// in input order wins regardless of completion order.
    fn fetch_all(&self, requests: &[QuoteRequest]) -> Result<Vec<PriceQuote>, AnalyzerError> {
        let width = self.settings.concurrency.max(1);
        info!(
            lookups = requests.len(),
            concurrency = width,
            "Fetching quotes"
        );

        if width == 1 || requests.len() < 2 {
            return requests
                .iter()
                .map(|req| self.quote_on(&req.symbol, req.date, req.field))
                .collect();
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(width)
            .thread_name(|i| format!("quote-fetch-{i}"))
            .build()
            .map_err(|e| AnalyzerError::Io(io::Error::other(e)))?;

        let results: Vec<Result<PriceQuote, AnalyzerError>> = pool.install(|| {
            requests
                .par_iter()
                .map(|req| self.quote_on(&req.symbol, req.date, req.field))
                .collect()
        });
        results.into_iter().collect()
    }
}
