//! JSON report adapter.

use crate::domain::error::AnalyzerError;
use crate::domain::returns::AnnualizedReturn;
use crate::ports::report_port::ReportPort;
use serde::Serialize;

pub struct JsonReportAdapter;

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AnalyzerError> {
    let mut out = serde_json::to_string_pretty(value).map_err(|e| AnalyzerError::Report {
        reason: format!("JSON encode error: {e}"),
    })?;
    out.push('\n');
    Ok(out)
}

impl ReportPort for JsonReportAdapter {
    fn render_symbols(&self, symbols: &[String]) -> Result<String, AnalyzerError> {
        to_json(symbols)
    }

    fn render_returns(&self, returns: &[AnnualizedReturn]) -> Result<String, AnalyzerError> {
        to_json(returns)
    }
}
