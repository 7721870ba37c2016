//! Road-event data endpoints
//!
//! The date picker is bounded by `/api/date-range`; the map draws whatever
//! `/api/events` returns for the selected date.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use roadsense_common::events::{markers_for_date, CategoryCounts};
use roadsense_common::{date_range, DateRange, IngestSummary, MapMarker};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::ApiError;
use crate::AppState;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query parameters for `/api/events`
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// Calendar date as `YYYY-MM-DD`; defaults to the earliest observed date
    pub date: Option<String>,
}

/// Date picker bounds
#[derive(Debug, Serialize)]
pub struct DateRangeResponse {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
    /// Initial selection (the earliest date)
    pub default: Option<NaiveDate>,
    pub total_events: usize,
}

/// Markers for one calendar date
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    /// Date that was sliced; `None` only when there are no events at all
    pub date: Option<NaiveDate>,
    pub range: Option<DateRange>,
    /// Valid events across all dates
    pub total_events: usize,
    pub ingest: IngestSummary,
    /// Per-category counts for this date
    pub counts: CategoryCounts,
    pub markers: Vec<MapMarker>,
    pub fetched_at: DateTime<Utc>,
    pub cached: bool,
}

/// GET /api/date-range
pub async fn get_date_range(
    State(state): State<AppState>,
) -> Result<Json<DateRangeResponse>, ApiError> {
    let loaded = state.load_events().await?;
    let range = date_range(&loaded.events);

    Ok(Json(DateRangeResponse {
        min: range.map(|r| r.min),
        max: range.map(|r| r.max),
        default: range.map(|r| r.min),
        total_events: loaded.events.len(),
    }))
}

/// GET /api/events?date=YYYY-MM-DD
///
/// A date outside the observed range yields an empty marker list.
pub async fn get_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<EventsResponse>, ApiError> {
    let requested = query.date.as_deref().map(parse_date).transpose()?;

    let loaded = state.load_events().await?;
    let range = date_range(&loaded.events);
    let date = requested.or(range.map(|r| r.min));

    let markers = match date {
        Some(date) => markers_for_date(&loaded.events, date),
        None => Vec::new(),
    };
    let counts: CategoryCounts = markers.iter().map(|marker| marker.category).collect();

    tracing::debug!(
        date = ?date,
        markers = markers.len(),
        total = loaded.events.len(),
        "Sliced road events"
    );

    Ok(Json(EventsResponse {
        date,
        range,
        total_events: loaded.events.len(),
        ingest: loaded.summary,
        counts,
        markers,
        fetched_at: loaded.fetched_at,
        cached: loaded.cached,
    }))
}

/// POST /api/refresh
///
/// Drops the cached feed collection; the next data request refetches.
pub async fn refresh(State(state): State<AppState>) -> Json<Value> {
    state.feed.invalidate().await;
    Json(json!({ "status": "ok" }))
}

fn parse_date(text: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| {
        ApiError::BadRequest(format!("Invalid date '{}': expected YYYY-MM-DD", text))
    })
}
