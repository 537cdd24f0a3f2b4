use chrono::{Duration, Local, NaiveDate, NaiveTime};

use crate::error::TimeError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses an `HH:MM` (or `H:MM`) time of day.
pub fn parse_time(s: &str) -> Result<NaiveTime, TimeError> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT).map_err(|_| TimeError::InvalidTime(s.to_string()))
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| TimeError::InvalidDate(s.to_string()))
}

pub fn format_time(t: NaiveTime) -> String {
    t.format(TIME_FORMAT).to_string()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Returns the canonical `HH:MM` form of a time string, e.g. `6:05` -> `06:05`.
pub fn normalize_time(s: &str) -> Result<String, TimeError> {
    parse_time(s).map(format_time)
}

/// Returns the canonical `YYYY-MM-DD` form of a date string.
pub fn normalize_date(s: &str) -> Result<String, TimeError> {
    parse_date(s).map(format_date)
}

/// Elapsed time between two times of day.
///
/// An end time earlier than the start time is read as crossing midnight, so
/// `23:30 -> 00:15` is 45 minutes. The result always lies in `[0, 24h)`.
pub fn calculate_duration(start_time: &str, end_time: &str) -> Result<Duration, TimeError> {
    let start = parse_time(start_time)?;
    let end = parse_time(end_time)?;
    let elapsed = end.signed_duration_since(start);
    if elapsed < Duration::zero() {
        Ok(elapsed + Duration::days(1))
    } else {
        Ok(elapsed)
    }
}

/// Human-readable duration: `45m`, `2h 00m`, `1h 05m`.
pub fn format_duration(d: Duration) -> String {
    let total = d.num_minutes();
    let (hours, minutes) = (total / 60, total % 60);
    if hours == 0 {
        format!("{}m", minutes)
    } else {
        format!("{}h {:02}m", hours, minutes)
    }
}

pub fn today() -> String {
    format_date(Local::now().date_naive())
}

/// Current local time truncated to the minute.
pub fn now_time() -> String {
    format_time(Local::now().time())
}
