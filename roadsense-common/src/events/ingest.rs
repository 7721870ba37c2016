//! Ingestion entry points
//!
//! normalize → filter → classify over a whole collection, preserving the
//! relative order of the records that survive.

use std::borrow::Borrow;

use chrono::FixedOffset;
use serde::Serialize;
use tracing::debug;

use super::classify::CategoryCounts;
use super::filter::{validate, ValidatedEvent};
use super::normalize::normalize;
use super::raw::RawEventRecord;

/// Knobs for a single ingestion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Fixed offset used to take the wall-clock of offset-bearing timestamps
    pub display_offset: Option<FixedOffset>,
}

/// Outcome counts of one ingestion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub received: usize,
    pub kept: usize,
    pub dropped: usize,
    pub categories: CategoryCounts,
}

/// Ingest with default options
pub fn ingest<I, R>(records: I) -> Vec<ValidatedEvent>
where
    I: IntoIterator<Item = R>,
    R: Borrow<RawEventRecord>,
{
    ingest_with(records, &IngestOptions::default())
}

pub fn ingest_with<I, R>(records: I, options: &IngestOptions) -> Vec<ValidatedEvent>
where
    I: IntoIterator<Item = R>,
    R: Borrow<RawEventRecord>,
{
    ingest_with_summary(records, options).0
}

/// Ingest and report how many records were kept, dropped and per category
pub fn ingest_with_summary<I, R>(
    records: I,
    options: &IngestOptions,
) -> (Vec<ValidatedEvent>, IngestSummary)
where
    I: IntoIterator<Item = R>,
    R: Borrow<RawEventRecord>,
{
    let mut summary = IngestSummary::default();
    let mut events = Vec::new();

    for record in records {
        summary.received += 1;
        match validate(normalize(record.borrow(), options.display_offset)) {
            Some(event) => {
                summary.categories.record(event.category);
                events.push(event);
            }
            None => summary.dropped += 1,
        }
    }
    summary.kept = events.len();

    debug!(
        received = summary.received,
        kept = summary.kept,
        dropped = summary.dropped,
        "Ingested road events"
    );

    (events, summary)
}
