//! Error responses for the JSON API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roadsense_common::FeedError;
use serde_json::json;

/// API errors
#[derive(Debug)]
pub enum ApiError {
    /// Upstream feed could not be fetched or decoded
    Feed(FeedError),
    /// Malformed request parameter
    BadRequest(String),
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        ApiError::Feed(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Feed(err) => {
                tracing::error!("Feed fetch failed: {}", err);
                (StatusCode::BAD_GATEWAY, format!("Feed error: {}", err))
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
