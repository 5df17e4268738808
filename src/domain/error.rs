//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for stock-analyzer.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("trade file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to parse trade file {path}: {reason}")]
    TradeParse { path: String, reason: String },

    #[error("network error fetching {symbol}: {reason}")]
    Network { symbol: String, reason: String },

    #[error("malformed price response for {symbol}: {reason}")]
    Decode { symbol: String, reason: String },

    #[error("no quotes for {symbol} between {start} and {end}")]
    NoQuotes {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("invalid price for {symbol}: {price}")]
    InvalidPrice { symbol: String, price: f64 },

    #[error("invalid holding period: {years} years (must be at least 1)")]
    InvalidHoldingPeriod { years: u32 },

    #[error("malformed date '{input}': {reason}")]
    MalformedDate { input: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    pub fn malformed_date(input: &str, reason: impl Into<String>) -> Self {
        AnalyzerError::MalformedDate {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&AnalyzerError> for std::process::ExitCode {
    fn from(err: &AnalyzerError) -> Self {
        let code: u8 = match err {
            AnalyzerError::Io(_)
            | AnalyzerError::FileNotFound { .. }
            | AnalyzerError::Report { .. } => 1,
            AnalyzerError::ConfigParse { .. }
            | AnalyzerError::ConfigMissing { .. }
            | AnalyzerError::ConfigInvalid { .. } => 2,
            AnalyzerError::Network { .. }
            | AnalyzerError::Decode { .. }
            | AnalyzerError::NoQuotes { .. } => 3,
            AnalyzerError::TradeParse { .. } | AnalyzerError::MalformedDate { .. } => 4,
            AnalyzerError::InvalidPrice { .. } | AnalyzerError::InvalidHoldingPeriod { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
