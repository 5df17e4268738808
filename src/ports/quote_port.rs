//! Historical price port trait.

use crate::domain::error::AnalyzerError;
use crate::domain::quote::PriceQuote;
use chrono::NaiveDate;

pub trait QuotePort: Send + Sync {
    /// Daily candles for `symbol` with `start <= date <= end`, oldest first.
    /// Days without trading are simply absent; an empty vector is not an error.
    fn fetch_window(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceQuote>, AnalyzerError>;
}
