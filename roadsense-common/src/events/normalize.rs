//! Per-field parsing of raw records
//!
//! Each field of interest goes through its own fallible parse. A failure
//! leaves the field absent; it is never an error and never coerced.

use chrono::{FixedOffset, NaiveDateTime};
use serde_json::Value;

use super::raw::{fields, RawEventRecord};
use crate::time::parse_timestamp;

/// A raw record with its fields of interest parsed into typed, optional values
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub event_type: String,
    pub event_subtype: String,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Parse the fields of interest out of a raw record
pub fn normalize(record: &RawEventRecord, display_offset: Option<FixedOffset>) -> NormalizedRecord {
    let timestamp = |name: &str| {
        record
            .get(name)
            .and_then(|value| parse_timestamp(value, display_offset))
    };

    NormalizedRecord {
        event_type: parse_text(record.get(fields::EVENT_TYPE)),
        event_subtype: parse_text(record.get(fields::EVENT_SUBTYPE)),
        start_time: timestamp(fields::START_TIME),
        end_time: timestamp(fields::END_TIME),
        latitude: record.get(fields::LATITUDE).and_then(parse_coordinate),
        longitude: record.get(fields::LONGITUDE).and_then(parse_coordinate),
    }
}

/// Parse a coordinate from a JSON number or numeric string.
///
/// Non-finite values are treated as unparseable.
pub fn parse_coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Text fields: missing or null is empty, scalars use their JSON text
fn parse_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_string_fields() {
        let record = RawEventRecord::from(json!({
            "EventType": "Collision",
            "EventSubType": "",
            "StartTime": "2024-05-01T10:00:00",
            "Latitude": "43.65",
            "Longitude": "-79.38",
        }));

        let normalized = normalize(&record, None);
        assert_eq!(normalized.event_type, "Collision");
        assert_eq!(normalized.event_subtype, "");
        assert!(normalized.start_time.is_some());
        assert_eq!(normalized.end_time, None);
        assert_eq!(normalized.latitude, Some(43.65));
        assert_eq!(normalized.longitude, Some(-79.38));
    }

    #[test]
    fn test_unparseable_values_become_absent() {
        let record = RawEventRecord::from(json!({
            "starttime": "not-a-date",
            "endtime": "soon",
            "latitude": "north-ish",
            "longitude": null,
        }));

        let normalized = normalize(&record, None);
        assert_eq!(normalized.start_time, None);
        assert_eq!(normalized.end_time, None);
        assert_eq!(normalized.latitude, None);
        assert_eq!(normalized.longitude, None);
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate(&json!(43.7)), Some(43.7));
        assert_eq!(parse_coordinate(&json!(-79)), Some(-79.0));
        assert_eq!(parse_coordinate(&json!(" 43.7 ")), Some(43.7));
        assert_eq!(parse_coordinate(&json!("NaN")), None);
        assert_eq!(parse_coordinate(&json!("inf")), None);
        assert_eq!(parse_coordinate(&json!("")), None);
        assert_eq!(parse_coordinate(&json!(true)), None);
        assert_eq!(parse_coordinate(&json!([43.7])), None);
    }

    #[test]
    fn test_non_string_text_fields() {
        let record = RawEventRecord::from(json!({
            "eventtype": 7,
            "eventsubtype": null,
        }));

        let normalized = normalize(&record, None);
        assert_eq!(normalized.event_type, "7");
        assert_eq!(normalized.event_subtype, "");
    }
}
