//! Validation of normalized records
//!
//! A record survives only with a start time, a latitude and a longitude.
//! Anything else is dropped as a whole, never repaired.

use chrono::{NaiveDate, NaiveDateTime};

use super::classify::{classify, Category, DisplayColor};
use super::normalize::NormalizedRecord;
use crate::time::format_display;

/// A record that passed the filter, with its category assigned
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEvent {
    pub event_type: String,
    pub event_subtype: String,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub latitude: f64,
    pub longitude: f64,
    pub category: Category,
}

impl ValidatedEvent {
    pub fn display_color(&self) -> DisplayColor {
        self.category.color()
    }

    /// Calendar date of the start time, used for date slicing
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Popup text combining type, subtype and start time
    pub fn label(&self) -> String {
        format!(
            "Event: {}\nSubtype: {}\nStartTime: {}",
            self.event_type,
            self.event_subtype,
            format_display(&self.start_time)
        )
    }
}

/// Keep a record only if its required fields parsed, then classify it
pub fn validate(record: NormalizedRecord) -> Option<ValidatedEvent> {
    let (Some(start_time), Some(latitude), Some(longitude)) =
        (record.start_time, record.latitude, record.longitude)
    else {
        return None;
    };

    let category = classify(&record.event_type, &record.event_subtype);

    Some(ValidatedEvent {
        event_type: record.event_type,
        event_subtype: record.event_subtype,
        start_time,
        end_time: record.end_time,
        latitude,
        longitude,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> NormalizedRecord {
        NormalizedRecord {
            event_type: "Road Work".to_string(),
            event_subtype: "Lane Closed".to_string(),
            start_time: NaiveDateTime::parse_from_str("2024-05-01 10:00:00", "%Y-%m-%d %H:%M:%S")
                .ok(),
            end_time: None,
            latitude: Some(43.7),
            longitude: Some(-79.4),
        }
    }

    #[test]
    fn test_complete_record_is_kept_and_classified() {
        let event = validate(record()).unwrap();
        assert_eq!(event.category, Category::LaneClosure);
        assert_eq!(event.display_color(), DisplayColor::Blue);
        assert_eq!(event.start_date(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_missing_required_field_drops_record() {
        let mut missing_start = record();
        missing_start.start_time = None;
        assert!(validate(missing_start).is_none());

        let mut missing_lat = record();
        missing_lat.latitude = None;
        assert!(validate(missing_lat).is_none());

        let mut missing_lon = record();
        missing_lon.longitude = None;
        assert!(validate(missing_lon).is_none());
    }

    #[test]
    fn test_missing_end_time_is_kept() {
        let mut no_end = record();
        no_end.end_time = None;
        assert!(validate(no_end).is_some());
    }

    #[test]
    fn test_label() {
        let event = validate(record()).unwrap();
        assert_eq!(
            event.label(),
            "Event: Road Work\nSubtype: Lane Closed\nStartTime: 2024-05-01 10:00:00"
        );
    }
}
