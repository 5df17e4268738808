//! Result rendering port trait.

use crate::domain::error::AnalyzerError;
use crate::domain::returns::AnnualizedReturn;

/// Port for rendering listing results to a printable document.
pub trait ReportPort {
    fn render_symbols(&self, symbols: &[String]) -> Result<String, AnalyzerError>;

    fn render_returns(&self, returns: &[AnnualizedReturn]) -> Result<String, AnalyzerError>;
}
