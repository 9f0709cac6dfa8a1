//! Lenient calendar date parsing.
//!
//! Grant and plan dates arrive as free-form strings from the editing UI.
//! The usual form is `YYYY-MM-DD`, but full timestamps are accepted too.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses a calendar date, returning `None` if the string is not a date.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::parse_calendar_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2026, 4, 1);
/// assert_eq!(parse_calendar_date("2026-04-01"), expected);
/// assert_eq!(parse_calendar_date("2026-04-01T00:00:00Z"), expected);
/// assert_eq!(parse_calendar_date("soon"), None);
/// ```
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|timestamp| timestamp.date())
}
