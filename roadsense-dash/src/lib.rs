//! roadsense-dash library - road-event map dashboard
//!
//! Serves a single map page plus the JSON endpoints it reads. Every data
//! request runs the ingestion pipeline over the (possibly cached) raw feed
//! collection; nothing derived from it is kept between requests.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use roadsense_common::config::MapConfig;
use roadsense_common::feed::{CachedSource, FeedError};
use roadsense_common::{ingest_with_summary, IngestOptions, IngestSummary, ValidatedEvent};
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Feed access with time-boxed memoization
    pub feed: Arc<CachedSource>,
    /// Options applied on every ingestion pass
    pub ingest: IngestOptions,
    /// Initial map view served to the page
    pub map: MapConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(feed: Arc<CachedSource>, ingest: IngestOptions, map: MapConfig) -> Self {
        Self { feed, ingest, map }
    }

    /// Fetch (or reuse) the raw collection and classify it
    pub async fn load_events(&self) -> Result<LoadedEvents, FeedError> {
        let snapshot = self.feed.get().await?;
        let (events, summary) = ingest_with_summary(snapshot.records.iter(), &self.ingest);
        Ok(LoadedEvents {
            events,
            summary,
            fetched_at: snapshot.fetched_at,
            cached: snapshot.cached,
        })
    }
}

/// One classified collection, valid for the duration of a single request
#[derive(Debug, Clone)]
pub struct LoadedEvents {
    pub events: Vec<ValidatedEvent>,
    pub summary: IngestSummary,
    pub fetched_at: DateTime<Utc>,
    pub cached: bool,
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/map-config", get(api::get_map_config))
        .route("/api/legend", get(api::get_legend))
        .route("/api/date-range", get(api::get_date_range))
        .route("/api/events", get(api::get_events))
        .route("/api/refresh", post(api::refresh));

    let pages = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(pages)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
