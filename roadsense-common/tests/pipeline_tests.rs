//! End-to-end tests for fetch payload → ingest → date slice → markers
//!
//! Each scenario starts from a JSON payload shaped like the 511 feed.

use chrono::NaiveDate;
use roadsense_common::events::{markers_for_date, Category, DisplayColor};
use roadsense_common::feed::records_from_payload;
use roadsense_common::{date_range, date_slice, ingest};
use serde_json::json;

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

#[test]
fn test_collision_is_red_on_its_date() {
    let records = records_from_payload(json!([{
        "EventType": "Collision",
        "EventSubType": "",
        "StartTime": "2024-05-01T10:00:00",
        "Latitude": "43.65",
        "Longitude": "-79.38",
    }]))
    .unwrap();

    let events = ingest(&records);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].category, Category::Collision);
    assert_eq!(events[0].display_color(), DisplayColor::Red);
    assert_eq!(date_slice(&events, date("2024-05-01")).len(), 1);
}

#[test]
fn test_unparseable_start_time_is_excluded_everywhere() {
    let records = records_from_payload(json!([{
        "EventType": "Collision",
        "EventSubType": "Lane Closed",
        "StartTime": "not-a-date",
        "Latitude": "43.65",
        "Longitude": "-79.38",
    }]))
    .unwrap();

    let events = ingest(&records);
    assert!(events.is_empty());
    assert!(date_range(&events).is_none());
}

#[test]
fn test_lane_closure_is_blue() {
    let records = records_from_payload(json!([{
        "EventType": "Road Work",
        "EventSubType": "Lane Closed",
        "StartTime": "2024-05-01T06:00:00",
        "Latitude": "43.7",
        "Longitude": "-79.4",
    }]))
    .unwrap();

    let events = ingest(&records);
    assert_eq!(events[0].category, Category::LaneClosure);
    assert_eq!(events[0].display_color(), DisplayColor::Blue);
}

#[test]
fn test_stalled_vehicle_is_orange() {
    let records = records_from_payload(json!([{
        "EventType": "Road Work",
        "EventSubType": "Vehicle Stalled",
        "StartTime": "2024-05-01T06:00:00",
        "Latitude": "43.7",
        "Longitude": "-79.4",
    }]))
    .unwrap();

    let events = ingest(&records);
    assert_eq!(events[0].category, Category::StoppedVehicle);
    assert_eq!(events[0].display_color(), DisplayColor::Orange);
}

#[test]
fn test_empty_payload_is_empty_output() {
    let records = records_from_payload(json!([])).unwrap();
    let events = ingest(&records);

    assert!(events.is_empty());
    assert!(markers_for_date(&events, date("2024-05-01")).is_empty());
}

#[test]
fn test_mixed_feed_day_view() {
    let records = records_from_payload(json!([
        {"EventType": "Collision", "EventSubType": "Lane Blocked", "StartTime": "2024-05-01T08:00:00", "Latitude": 43.60, "Longitude": -79.50},
        {"EventType": "Incident", "EventSubType": "Disabled Vehicle", "StartTime": "2024-05-02T09:00:00", "Latitude": 43.61, "Longitude": -79.51},
        {"EventType": "Construction", "EventSubType": "Lane Closure", "StartTime": "2024-05-01T10:00:00", "Latitude": 43.62, "Longitude": -79.52},
        {"EventType": "Special Event", "EventSubType": "Parade", "StartTime": "2024-05-01T11:00:00", "Latitude": 43.63, "Longitude": -79.53},
        {"EventType": "Collision", "StartTime": "2024-05-01T12:00:00", "Latitude": null, "Longitude": -79.54},
        "garbage",
    ]))
    .unwrap();

    let events = ingest(&records);
    assert_eq!(events.len(), 4);

    let range = date_range(&events).unwrap();
    assert_eq!(range.min, date("2024-05-01"));
    assert_eq!(range.max, date("2024-05-02"));

    let markers = markers_for_date(&events, date("2024-05-01"));
    let colors: Vec<DisplayColor> = markers.iter().map(|m| m.color).collect();
    assert_eq!(
        colors,
        vec![DisplayColor::Red, DisplayColor::Blue, DisplayColor::Green]
    );
    assert_eq!(
        markers[1].label,
        "Event: Construction\nSubtype: Lane Closure\nStartTime: 2024-05-01 10:00:00"
    );

    assert!(markers_for_date(&events, date("2024-05-03")).is_empty());
}
