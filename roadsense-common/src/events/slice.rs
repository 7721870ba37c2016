//! Date slicing and the marker tuples handed to the map

use chrono::NaiveDate;
use serde::Serialize;

use super::classify::{Category, DisplayColor};
use super::filter::ValidatedEvent;

/// Inclusive range of start dates observed in a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

/// Min and max start date, or `None` for an empty collection
pub fn date_range(events: &[ValidatedEvent]) -> Option<DateRange> {
    let mut dates = events.iter().map(ValidatedEvent::start_date);
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(min, max), date| {
        (min.min(date), max.max(date))
    });
    Some(DateRange { min, max })
}

/// Events whose start time falls on `date`, in input order
pub fn date_slice(events: &[ValidatedEvent], date: NaiveDate) -> Vec<&ValidatedEvent> {
    events
        .iter()
        .filter(|event| event.start_date() == date)
        .collect()
}

/// One map marker: position, fill color and popup label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub color: DisplayColor,
    pub category: Category,
    pub label: String,
}

impl From<&ValidatedEvent> for MapMarker {
    fn from(event: &ValidatedEvent) -> Self {
        Self {
            latitude: event.latitude,
            longitude: event.longitude,
            color: event.display_color(),
            category: event.category,
            label: event.label(),
        }
    }
}

/// Date-slice and project straight to markers
pub fn markers_for_date(events: &[ValidatedEvent], date: NaiveDate) -> Vec<MapMarker> {
    date_slice(events, date)
        .into_iter()
        .map(MapMarker::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ingest;
    use crate::events::RawEventRecord;
    use serde_json::json;

    fn event(event_type: &str, start: &str) -> RawEventRecord {
        RawEventRecord::from(json!({
            "EventType": event_type,
            "EventSubType": "",
            "StartTime": start,
            "Latitude": "43.65",
            "Longitude": "-79.38",
        }))
    }

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Vec<ValidatedEvent> {
        ingest(vec![
            event("Collision", "2024-05-01T10:00:00"),
            event("Closure", "2024-05-02T00:00:00"),
            event("Accident", "2024-05-01T23:59:59"),
            event("Construction", "2024-04-30T08:15:00"),
        ])
    }

    #[test]
    fn test_slice_selects_calendar_date_in_order() {
        let events = sample();
        let slice = date_slice(&events, date("2024-05-01"));

        let types: Vec<&str> = slice.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(types, vec!["Collision", "Accident"]);
    }

    #[test]
    fn test_slice_outside_range_is_empty() {
        let events = sample();
        assert!(date_slice(&events, date("2023-01-01")).is_empty());
        assert!(date_slice(&events, date("2024-05-03")).is_empty());
        assert!(date_slice(&[], date("2024-05-01")).is_empty());
    }

    #[test]
    fn test_date_range() {
        let events = sample();
        let range = date_range(&events).unwrap();
        assert_eq!(range.min, date("2024-04-30"));
        assert_eq!(range.max, date("2024-05-02"));
        assert_eq!(
            date_range(&events[..1]),
            Some(DateRange { min: date("2024-05-01"), max: date("2024-05-01") })
        );

        assert_eq!(date_range(&[]), None);
    }

    #[test]
    fn test_markers_for_date() {
        let events = sample();
        let markers = markers_for_date(&events, date("2024-05-01"));

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].color, DisplayColor::Red);
        assert_eq!(markers[0].latitude, 43.65);
        assert_eq!(markers[0].longitude, -79.38);
        assert!(markers[0].label.starts_with("Event: Collision\n"));

        let value = serde_json::to_value(&markers[1]).unwrap();
        assert_eq!(value["color"], "red");
        assert_eq!(value["category"], "collision");
    }
}
