//! TTL cache for computed per-shift metrics.
//!
//! Dashboards poll the metrics endpoint far more often than the numbers
//! meaningfully change, so the API layer memoizes each shift's computed
//! metrics for a configurable freshness window instead of hitting the
//! store on every request. The cache belongs to the API layer: the
//! computation core below it stays a pure function.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::EngineResult;
use crate::models::OeeMetrics;

struct CacheEntry {
    computed_at: Instant,
    metrics: OeeMetrics,
}

/// Memoizes per-shift [`OeeMetrics`] for a fixed time-to-live.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use oee_engine::api::MetricsCache;
/// use oee_engine::models::OeeMetrics;
///
/// let cache = MetricsCache::new(Duration::from_secs(5));
/// let metrics = cache
///     .get_or_compute(1, || Ok(OeeMetrics::zeroed(28800.0, 0.0, 0, 0)))
///     .unwrap();
/// assert_eq!(metrics.planned_time_secs, 28800.0);
/// ```
pub struct MetricsCache {
    ttl: Duration,
    entries: Mutex<HashMap<i64, CacheEntry>>,
}

impl MetricsCache {
    /// Creates a cache whose entries stay fresh for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached metrics for `shift_id` if still fresh,
    /// otherwise runs `compute`, caches its result and returns it.
    ///
    /// Errors from `compute` are passed through and never cached, so a
    /// transient store failure does not poison the entry.
    pub fn get_or_compute<F>(&self, shift_id: i64, compute: F) -> EngineResult<OeeMetrics>
    where
        F: FnOnce() -> EngineResult<OeeMetrics>,
    {
        {
            let entries = self.lock_entries();
            if let Some(entry) = entries.get(&shift_id) {
                if entry.computed_at.elapsed() < self.ttl {
                    return Ok(entry.metrics.clone());
                }
            }
        }

        // The lock is not held while computing.
        let metrics = compute()?;

        let mut entries = self.lock_entries();
        entries.insert(
            shift_id,
            CacheEntry {
                computed_at: Instant::now(),
                metrics: metrics.clone(),
            },
        );
        Ok(metrics)
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<i64, CacheEntry>> {
        // Entries are plain data; a poisoned lock is recoverable.
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
