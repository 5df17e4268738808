//! Calendar arithmetic on `YYYY-MM-DD` dates.
//!
//! Plain proleptic Gregorian day counting: no timezones, no trading-day
//! awareness. Month/year rollover and leap years come from `chrono`.

use crate::domain::error::AnalyzerError;
use chrono::{Days, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days subtracted per holding-period year.
pub const DAYS_PER_YEAR: i64 = 365;

pub fn parse_date(input: &str) -> Result<NaiveDate, AnalyzerError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|e| AnalyzerError::malformed_date(input, e.to_string()))
}

/// Shift `date` back by `days` (forward when negative).
///
/// Returns `None` only when the result falls outside chrono's date range.
pub fn shift_back(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_sub_days(Days::new(days as u64))
    } else {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    }
}

/// The date exactly `days` before `input`, formatted `YYYY-MM-DD`.
pub fn offset_date(input: &str, days: i64) -> Result<String, AnalyzerError> {
    let date = parse_date(input)?;
    let shifted = shift_back(date, days)
        .ok_or_else(|| AnalyzerError::malformed_date(input, format!("offset {days} days is out of range")))?;
    Ok(shifted.format(DATE_FORMAT).to_string())
}
