//! Time-boxed memoization of the raw event collection
//!
//! Owned by the caller, not by ingestion. Concurrent misses are serialized
//! behind the entry lock, so the source is hit at most once per expiry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::{EventSource, FeedError};
use crate::events::RawEventRecord;

struct CacheEntry {
    fetched_at: Instant,
    fetched_at_utc: DateTime<Utc>,
    records: Arc<Vec<RawEventRecord>>,
}

/// Result of [`CachedSource::get`]
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Arc<Vec<RawEventRecord>>,
    pub fetched_at: DateTime<Utc>,
    /// True when served from the cache without touching the source
    pub cached: bool,
}

/// Wraps an [`EventSource`] and reuses its last successful result for `ttl`
pub struct CachedSource {
    source: Arc<dyn EventSource>,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl CachedSource {
    /// A zero `ttl` disables caching
    pub fn new(source: Arc<dyn EventSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn source_id(&self) -> &str {
        self.source.source_id()
    }

    /// Return the cached collection if still fresh, otherwise refetch.
    ///
    /// A failed refetch is returned as-is and leaves the previous entry in
    /// place; being expired, it will not be served.
    pub async fn get(&self) -> Result<Snapshot, FeedError> {
        let mut entry = self.entry.lock().await;

        if let Some(current) = entry.as_ref() {
            if !self.ttl.is_zero() && current.fetched_at.elapsed() < self.ttl {
                tracing::debug!(source = %self.source.source_id(), "Fetch cache hit");
                return Ok(Snapshot {
                    records: Arc::clone(&current.records),
                    fetched_at: current.fetched_at_utc,
                    cached: true,
                });
            }
        }

        tracing::debug!(source = %self.source.source_id(), "Fetch cache miss");
        let records = Arc::new(self.source.fetch().await?);
        let fetched_at_utc = crate::time::now();

        *entry = Some(CacheEntry {
            fetched_at: Instant::now(),
            fetched_at_utc,
            records: Arc::clone(&records),
        });

        Ok(Snapshot {
            records,
            fetched_at: fetched_at_utc,
            cached: false,
        })
    }

    /// Force the next [`get`](Self::get) to refetch
    pub async fn invalidate(&self) {
        let mut entry = self.entry.lock().await;
        if entry.take().is_some() {
            tracing::info!(source = %self.source.source_id(), "Fetch cache invalidated");
        }
    }

    /// Age of the current entry, if any
    pub async fn age(&self) -> Option<Duration> {
        self.entry
            .lock()
            .await
            .as_ref()
            .map(|current| current.fetched_at.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts fetches; fails every call once `fail` is set
    struct CountingSource {
        calls: AtomicUsize,
        fail: std::sync::atomic::AtomicBool,
    }

    impl CountingSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: std::sync::atomic::AtomicBool::new(false),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EventSource for CountingSource {
        fn source_id(&self) -> &str {
            "counting"
        }

        async fn fetch(&self) -> Result<Vec<RawEventRecord>, FeedError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail.load(Ordering::SeqCst) {
                return Err(FeedError::Network("unreachable".to_string()));
            }
            Ok(vec![RawEventRecord::from(json!({ "id": n }))])
        }
    }

    #[tokio::test]
    async fn test_hit_within_ttl() {
        let source = CountingSource::new();
        let cache = CachedSource::new(source.clone(), Duration::from_secs(3600));

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();

        assert_eq!(source.calls(), 1);
        assert!(!first.cached);
        assert!(second.cached);
        assert!(Arc::ptr_eq(&first.records, &second.records));
        assert_eq!(first.fetched_at, second.fetched_at);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_refetches() {
        let source = CountingSource::new();
        let cache = CachedSource::new(source.clone(), Duration::ZERO);

        cache.get().await.unwrap();
        cache.get().await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_expiry_refetches() {
        let source = CountingSource::new();
        let cache = CachedSource::new(source.clone(), Duration::from_millis(20));

        cache.get().await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        let refreshed = cache.get().await.unwrap();

        assert_eq!(source.calls(), 2);
        assert!(!refreshed.cached);
        assert_eq!(refreshed.records[0].get("id"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = CountingSource::new();
        let cache = CachedSource::new(source.clone(), Duration::from_secs(3600));

        cache.get().await.unwrap();
        assert!(cache.age().await.is_some());

        cache.invalidate().await;
        assert!(cache.age().await.is_none());

        cache.get().await.unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_is_surfaced_and_not_cached() {
        let source = CountingSource::new();
        source.fail.store(true, Ordering::SeqCst);
        let cache = CachedSource::new(source.clone(), Duration::from_secs(3600));

        assert!(matches!(cache.get().await, Err(FeedError::Network(_))));

        source.fail.store(false, Ordering::SeqCst);
        let snapshot = cache.get().await.unwrap();
        assert!(!snapshot.cached);
        assert_eq!(source.calls(), 2);
    }
}
