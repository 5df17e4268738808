//! Tiingo end-of-day price adapter.
//!
//! `GET {base_url}/tiingo/daily/{symbol}/prices?startDate=..&endDate=..`
//! returns a JSON array of daily candles, oldest first. The access token
//! travels in the `Authorization` header so request URLs are safe to log.

use crate::domain::calendar::DATE_FORMAT;
use crate::domain::error::AnalyzerError;
use crate::domain::quote::PriceQuote;
use crate::ports::quote_port::QuotePort;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.tiingo.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, PartialEq)]
pub struct TiingoConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for TiingoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiingoConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// One element of the Tiingo prices response. Adjusted prices, volume and
/// dividend fields are ignored.
#[derive(Debug, Deserialize)]
struct TiingoCandle {
    /// Midnight UTC of the trading day, e.g. `2021-03-10T00:00:00.000Z`.
    date: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

pub struct TiingoAdapter {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl TiingoAdapter {
    pub fn new(config: &TiingoConfig) -> Result<Self, AnalyzerError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| AnalyzerError::ConfigInvalid {
            section: "tiingo".into(),
            key: "base_url".into(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AnalyzerError::ConfigInvalid {
                section: "tiingo".into(),
                key: "base_url".into(),
                reason: "not a base URL".into(),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("stock-analyzer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AnalyzerError::ConfigInvalid {
                section: "tiingo".into(),
                key: "timeout_secs".into(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    pub fn prices_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["tiingo", "daily", symbol, "prices"]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("startDate", &start.format(DATE_FORMAT).to_string())
            .append_pair("endDate", &end.format(DATE_FORMAT).to_string());
        url
    }
}

/// Decode a Tiingo prices body into quotes sorted by date.
pub fn parse_candles(symbol: &str, body: &str) -> Result<Vec<PriceQuote>, AnalyzerError> {
    let candles: Vec<TiingoCandle> =
        serde_json::from_str(body).map_err(|e| AnalyzerError::Decode {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        })?;

    let mut quotes: Vec<PriceQuote> = candles
        .into_iter()
        .map(|c| PriceQuote {
            symbol: symbol.to_string(),
            date: c.date.date_naive(),
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
        })
        .collect();

    quotes.sort_by_key(|q| q.date);
    Ok(quotes)
}

impl QuotePort for TiingoAdapter {
    fn fetch_window(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceQuote>, AnalyzerError> {
        let token = self.token.as_deref().ok_or_else(|| AnalyzerError::ConfigMissing {
            section: "tiingo".into(),
            key: "token".into(),
        })?;
        let url = self.prices_url(symbol, start, end);
        debug!(%url, "Requesting Tiingo prices");

        let network = |reason: String| AnalyzerError::Network {
            symbol: symbol.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Token {token}"))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(network(format!("HTTP {status}: {}", body.trim())));
        }

        let body = response.text().map_err(|e| network(e.to_string()))?;
        let quotes = parse_candles(symbol, &body)?;
        debug!(symbol, candles = quotes.len(), "Tiingo prices received");
        Ok(quotes)
    }
}
