//! Daily price candles and price-field selection.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Which price of a candle a listing is keyed on.
///
/// The field also decides which candle of a trailing window is picked:
/// closing mode takes the latest candle (the price on or just before the
/// requested date), opening mode takes the earliest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceField {
    #[default]
    Close,
    Open,
}

impl PriceField {
    pub fn value(self, quote: &PriceQuote) -> f64 {
        match self {
            PriceField::Close => quote.close,
            PriceField::Open => quote.open,
        }
    }

    /// Pick the candle this field reads from a chronologically ordered window.
    pub fn select(self, window: &[PriceQuote]) -> Option<&PriceQuote> {
        match self {
            PriceField::Close => window.last(),
            PriceField::Open => window.first(),
        }
    }
}

impl std::fmt::Display for PriceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceField::Close => write!(f, "close"),
            PriceField::Open => write!(f, "open"),
        }
    }
}
