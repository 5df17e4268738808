#![allow(dead_code)]

use chrono::NaiveDate;
use stock_analyzer::domain::error::AnalyzerError;
pub use stock_analyzer::domain::quote::PriceQuote;
use stock_analyzer::domain::trade::{TradeRecord, TradeType};
use stock_analyzer::ports::quote_port::QuotePort;
use stock_analyzer::ports::trade_port::TradePort;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

pub struct MockTradePort {
    pub trades: Vec<TradeRecord>,
}

impl MockTradePort {
    pub fn new(symbols: &[&str]) -> Self {
        Self {
            trades: symbols.iter().map(|s| make_trade(s)).collect(),
        }
    }
}

impl TradePort for MockTradePort {
    fn load_trades(&self, _source: &Path) -> Result<Vec<TradeRecord>, AnalyzerError> {
        Ok(self.trades.clone())
    }
}

/// Quote port backed by in-memory candle series. Requests are recorded so
/// tests can check which windows were asked for.
pub struct MockQuotePort {
    pub data: HashMap<String, Vec<PriceQuote>>,
    pub errors: HashMap<String, String>,
    pub calls: Mutex<Vec<(String, NaiveDate, NaiveDate)>>,
}

impl MockQuotePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_candle(mut self, symbol: &str, date: &str, open: f64, close: f64) -> Self {
        self.data
            .entry(symbol.to_string())
            .or_default()
            .push(make_quote(symbol, date, open, close));
        self
    }

    pub fn with_close(self, symbol: &str, date: &str, close: f64) -> Self {
        self.with_candle(symbol, date, close, close)
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl QuotePort for MockQuotePort {
    fn fetch_window(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceQuote>, AnalyzerError> {
        self.calls
            .lock()
            .unwrap()
            .push((symbol.to_string(), start, end));
        if let Some(reason) = self.errors.get(symbol) {
            return Err(AnalyzerError::Network {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        let mut window: Vec<PriceQuote> = self
            .data
            .get(symbol)
            .map(|series| {
                series
                    .iter()
                    .filter(|q| q.date >= start && q.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        window.sort_by_key(|q| q.date);
        Ok(window)
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn make_trade(symbol: &str) -> TradeRecord {
    TradeRecord {
        symbol: symbol.to_string(),
        quantity: 100,
        trade_type: TradeType::Buy,
        purchase_date: date("2019-01-02"),
    }
}

pub fn make_quote(symbol: &str, day: &str, open: f64, close: f64) -> PriceQuote {
    PriceQuote {
        symbol: symbol.to_string(),
        date: date(day),
        open,
        high: open.max(close) + 1.0,
        low: open.min(close) - 1.0,
        close,
    }
}

pub fn trades_json(symbols: &[&str]) -> String {
    let rows: Vec<String> = symbols
        .iter()
        .map(|s| {
            format!(
                r#"{{"symbol":"{s}","quantity":100,"tradeType":"BUY","purchaseDate":"2019-01-02"}}"#
            )
        })
        .collect();
    format!("[{}]", rows.join(","))
}

pub fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
