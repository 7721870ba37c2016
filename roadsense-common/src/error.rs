//! Common error types for RoadSense

use thiserror::Error;

/// Common result type for RoadSense operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across RoadSense crates
///
/// Feed failures have their own [`FeedError`](crate::feed::FeedError).
/// Malformed upstream records are not represented at all: they are dropped
/// during ingestion and never surface as errors.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
