//! Liveness endpoint with fetch-cache status

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// State of the fetch cache at the time of the request
#[derive(Debug, Serialize)]
pub struct FeedCacheStatus {
    pub source: String,
    pub ttl_secs: u64,
    /// Seconds since the held collection was fetched; `None` when empty
    pub age_secs: Option<u64>,
    /// Whether the next data request will be served without fetching
    pub fresh: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub feed: FeedCacheStatus,
}

/// GET /health
///
/// Reads only the cache bookkeeping; never fetches, so it answers while the
/// upstream feed is down.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let ttl = state.feed.ttl();
    let age = state.feed.age().await;

    Json(HealthResponse {
        status: "ok",
        module: "roadsense-dash",
        version: env!("CARGO_PKG_VERSION"),
        feed: FeedCacheStatus {
            source: state.feed.source_id().to_string(),
            ttl_secs: ttl.as_secs(),
            age_secs: age.map(|age| age.as_secs()),
            fresh: age.is_some_and(|age| !ttl.is_zero() && age < ttl),
        },
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
