//! Road-event ingestion and classification
//!
//! A straight-line transform over one fetched collection:
//!
//! 1. [`raw`]: loosely-typed records with case-folded field names
//! 2. [`normalize`]: fallible per-field parsing into optional values
//! 3. [`filter`]: drop records missing a start time or a position
//! 4. [`classify`]: assign exactly one [`Category`] by precedence
//! 5. [`slice`]: select one calendar date and project map markers
//!
//! [`ingest`] runs steps 1-4. Nothing in this module performs I/O or
//! returns an error for a malformed record.

pub mod classify;
pub mod filter;
pub mod ingest;
pub mod normalize;
pub mod raw;
pub mod slice;

pub use classify::{classify, Category, CategoryCounts, DisplayColor};
pub use filter::ValidatedEvent;
pub use ingest::{ingest, ingest_with, ingest_with_summary, IngestOptions, IngestSummary};
pub use normalize::{normalize, NormalizedRecord};
pub use raw::RawEventRecord;
pub use slice::{date_range, date_slice, markers_for_date, DateRange, MapMarker};
