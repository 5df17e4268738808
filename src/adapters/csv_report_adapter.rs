//! CSV report adapter.

use crate::domain::error::AnalyzerError;
use crate::domain::returns::AnnualizedReturn;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

fn report_error(e: impl std::fmt::Display) -> AnalyzerError {
    AnalyzerError::Report {
        reason: format!("CSV write error: {e}"),
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, AnalyzerError> {
    let bytes = writer.into_inner().map_err(report_error)?;
    String::from_utf8(bytes).map_err(report_error)
}

impl ReportPort for CsvReportAdapter {
    fn render_symbols(&self, symbols: &[String]) -> Result<String, AnalyzerError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["symbol"]).map_err(report_error)?;
        for symbol in symbols {
            writer.write_record([symbol]).map_err(report_error)?;
        }
        finish(writer)
    }

    fn render_returns(&self, returns: &[AnnualizedReturn]) -> Result<String, AnalyzerError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        if returns.is_empty() {
            writer
                .write_record(["symbol", "simple_return", "annualized_return"])
                .map_err(report_error)?;
        }
        for r in returns {
            writer.serialize(r).map_err(report_error)?;
        }
        finish(writer)
    }
}
