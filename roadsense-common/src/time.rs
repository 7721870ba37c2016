//! Timestamp utilities
//!
//! Feed timestamps arrive in whatever shape the upstream publishes: ISO 8601
//! strings with or without an offset, plain dates, US-style `MM/DD/YYYY`
//! dates, bare years, or Unix epoch seconds and milliseconds. Everything is
//! reduced to a wall-clock [`NaiveDateTime`], which is what date slicing
//! compares against. Anything unparseable becomes `None`.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Naive (offset-free) layouts accepted for feed timestamps, tried in order
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts, read as midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Offset-bearing layouts not covered by RFC 3339 (e.g. `+0000` without colon)
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Epoch magnitudes at or above this are milliseconds (1e11 s is past year 5000)
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Years an epoch value may land in; anything else is a unit mix-up
const EPOCH_YEARS: RangeInclusive<i32> = 2000..=2100;

/// Layout used when a timestamp is shown to a user
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a JSON feed value as a wall-clock timestamp.
///
/// Integers (and integral floats) are Unix epoch values in UTC, see
/// [`from_epoch`]. Strings go through [`parse_timestamp_str`]. Null, booleans
/// and containers are absent.
///
/// `display_offset` shifts offset-bearing and epoch values into a fixed
/// offset before the wall-clock is taken. Naive values are left untouched.
pub fn parse_timestamp(
    value: &Value,
    display_offset: Option<FixedOffset>,
) -> Option<NaiveDateTime> {
    match value {
        Value::String(text) => parse_timestamp_str(text, display_offset),
        Value::Number(number) => {
            if let Some(epoch) = number.as_i64() {
                from_epoch(epoch, display_offset)
            } else {
                let epoch = number.as_f64()?;
                if !epoch.is_finite() || epoch.fract() != 0.0 {
                    return None;
                }
                from_epoch(epoch as i64, display_offset)
            }
        }
        _ => None,
    }
}

/// Parse a textual timestamp.
///
/// # Examples
///
/// ```
/// use roadsense_common::time::parse_timestamp_str;
///
/// let ts = parse_timestamp_str("2024-05-01T10:00:00", None).unwrap();
/// assert_eq!(ts.to_string(), "2024-05-01 10:00:00");
///
/// // An offset is kept as the wall-clock of that offset
/// let ts = parse_timestamp_str("2024-05-01T23:30:00-04:00", None).unwrap();
/// assert_eq!(ts.to_string(), "2024-05-01 23:30:00");
///
/// assert!(parse_timestamp_str("not-a-date", None).is_none());
/// ```
pub fn parse_timestamp_str(
    text: &str,
    display_offset: Option<FixedOffset>,
) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let unsigned = text.strip_prefix('-').unwrap_or(text);
    if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return parse_digits(text, display_offset);
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        return Some(wall_clock(with_offset, display_offset));
    }
    for format in OFFSET_FORMATS {
        if let Ok(with_offset) = DateTime::parse_from_str(text, format) {
            return Some(wall_clock(with_offset, display_offset));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Convert a Unix epoch value to a wall-clock timestamp (UTC unless shifted).
///
/// Magnitudes of 1e11 and above are milliseconds, smaller ones seconds. The
/// result must fall in 2000..=2100; small counters and mis-scaled values are
/// absent rather than dated to 1970 or the far future.
pub fn from_epoch(epoch: i64, display_offset: Option<FixedOffset>) -> Option<NaiveDateTime> {
    let utc = if epoch.unsigned_abs() >= EPOCH_MILLIS_THRESHOLD as u64 {
        DateTime::<Utc>::from_timestamp_millis(epoch)?
    } else {
        DateTime::<Utc>::from_timestamp(epoch, 0)?
    };
    if !EPOCH_YEARS.contains(&utc.year()) {
        return None;
    }
    Some(match display_offset {
        Some(offset) => utc.with_timezone(&offset).naive_local(),
        None => utc.naive_utc(),
    })
}

/// Format a timestamp for popups and labels
pub fn format_display(timestamp: &NaiveDateTime) -> String {
    timestamp.format(DISPLAY_FORMAT).to_string()
}

/// All-digit text: `YYYY` (January 1), `YYYYMMDD`, or an epoch value
fn parse_digits(text: &str, display_offset: Option<FixedOffset>) -> Option<NaiveDateTime> {
    let date = match text.len() {
        4 => text
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
        8 => NaiveDate::parse_from_str(text, "%Y%m%d").ok(),
        _ => None,
    };
    if let Some(date) = date {
        return date.and_hms_opt(0, 0, 0);
    }
    text.parse::<i64>()
        .ok()
        .and_then(|epoch| from_epoch(epoch, display_offset))
}

fn wall_clock(
    timestamp: DateTime<FixedOffset>,
    display_offset: Option<FixedOffset>,
) -> NaiveDateTime {
    match display_offset {
        Some(offset) => timestamp.with_timezone(&offset).naive_local(),
        None => timestamp.naive_local(),
    }
}
