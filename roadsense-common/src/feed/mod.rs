//! Upstream feed access
//!
//! The fetch boundary is the only place in this crate that can fail. A
//! failed fetch surfaces as [`FeedError`]; a malformed individual record
//! does not, it is handled by ingestion.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::events::RawEventRecord;

pub mod cache;
pub mod client;

pub use cache::{CachedSource, Snapshot};
pub use client::FeedClient;

/// Feed fetch errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Anything that can produce the current raw event collection
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Identifier used in logs (e.g. the feed URL)
    fn source_id(&self) -> &str;

    /// Fetch the full current collection (no pagination)
    async fn fetch(&self) -> Result<Vec<RawEventRecord>, FeedError>;
}

/// Split a decoded payload into records; the payload must be a JSON array
pub fn records_from_payload(payload: Value) -> Result<Vec<RawEventRecord>, FeedError> {
    match payload {
        Value::Array(items) => Ok(items.into_iter().map(RawEventRecord::from).collect()),
        other => Err(FeedError::Parse(format!(
            "expected a JSON array of events, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
