//! Core domain types and logic.

pub mod analyzer;
pub mod calendar;
pub mod error;
pub mod ordering;
pub mod quote;
pub mod returns;
pub mod trade;
