//! Trade file loading port trait.

use crate::domain::error::AnalyzerError;
use crate::domain::trade::TradeRecord;
use std::path::Path;

pub trait TradePort: Send + Sync {
    /// Load every trade record from `source`, in file order.
    fn load_trades(&self, source: &Path) -> Result<Vec<TradeRecord>, AnalyzerError>;
}
