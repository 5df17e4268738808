//! Plain-text report adapter: one symbol per line, aligned return tables.

use crate::domain::error::AnalyzerError;
use crate::domain::returns::AnnualizedReturn;
use crate::ports::report_port::ReportPort;
use std::fmt::{self, Write};

pub struct TextReportAdapter;

fn pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn report_error(e: fmt::Error) -> AnalyzerError {
    AnalyzerError::Report {
        reason: e.to_string(),
    }
}

impl ReportPort for TextReportAdapter {
    fn render_symbols(&self, symbols: &[String]) -> Result<String, AnalyzerError> {
        let mut out = String::new();
        for symbol in symbols {
            out.push_str(symbol);
            out.push('\n');
        }
        Ok(out)
    }

    fn render_returns(&self, returns: &[AnnualizedReturn]) -> Result<String, AnalyzerError> {
        // Format padding counts chars, so the column width must too.
        let width = returns
            .iter()
            .map(|r| r.symbol.chars().count())
            .chain(std::iter::once("SYMBOL".len()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        writeln!(out, "{:<width$}  {:>10}  {:>10}", "SYMBOL", "SIMPLE", "ANNUALIZED")
            .map_err(report_error)?;
        for r in returns {
            writeln!(
                out,
                "{:<width$}  {:>10}  {:>10}",
                r.symbol,
                pct(r.simple_return),
                pct(r.annualized_return),
            )
            .map_err(report_error)?;
        }
        Ok(out)
    }
}
