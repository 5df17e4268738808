//! Port traits at the I/O seams of the analyzer.

pub mod config_port;
pub mod quote_port;
pub mod report_port;
pub mod trade_port;
