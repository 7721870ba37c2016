//! # RoadSense Common Library
//!
//! Shared code for the RoadSense dashboard including:
//! - Road-event ingestion, classification and date slicing
//! - The upstream feed client and its time-boxed fetch cache
//! - Configuration loading
//! - Timestamp parsing
//!
//! The [`events`] module is pure: it performs no I/O and never fails on a
//! malformed record. Everything that touches the network lives in [`feed`].

pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod time;

pub use error::{Error, Result};
pub use events::{
    date_range, date_slice, ingest, ingest_with, ingest_with_summary, Category, DateRange,
    DisplayColor, IngestOptions, IngestSummary, MapMarker, RawEventRecord, ValidatedEvent,
};
pub use feed::{CachedSource, EventSource, FeedClient, FeedError};
