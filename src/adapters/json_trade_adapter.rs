//! JSON trade file adapter.

use crate::domain::error::AnalyzerError;
use crate::domain::trade::TradeRecord;
use crate::ports::trade_port::TradePort;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads a JSON array of trade records. Relative paths resolve against
/// `base_dir` when one is configured.
#[derive(Debug, Clone, Default)]
pub struct JsonTradeAdapter {
    base_dir: Option<PathBuf>,
}

impl JsonTradeAdapter {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    pub fn resolve(&self, source: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if source.is_relative() => dir.join(source),
            _ => source.to_path_buf(),
        }
    }
}

pub fn parse_trades(content: &str, origin: &str) -> Result<Vec<TradeRecord>, AnalyzerError> {
    serde_json::from_str(content).map_err(|e| AnalyzerError::TradeParse {
        path: origin.to_string(),
        reason: e.to_string(),
    })
}

impl TradePort for JsonTradeAdapter {
    fn load_trades(&self, source: &Path) -> Result<Vec<TradeRecord>, AnalyzerError> {
        let path = self.resolve(source);
        debug!(path = %path.display(), "Reading trade file");

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AnalyzerError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => AnalyzerError::Io(e),
        })?;

        parse_trades(&content, &path.display().to_string())
    }
}
