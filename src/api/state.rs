//! Application state for the OEE Monitoring Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::api::cache::MetricsCache;
use crate::config::CacheConfig;
use crate::store::LineStore;

/// Shared application state.
///
/// Contains the store handle and the metrics cache shared across all
/// request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the production-line store.
    store: LineStore,
    /// TTL cache for computed per-shift metrics.
    cache: Arc<MetricsCache>,
}

impl AppState {
    /// Creates a new application state around the given store.
    pub fn new(store: LineStore, cache_config: &CacheConfig) -> Self {
        Self {
            store,
            cache: Arc::new(MetricsCache::new(cache_config.metrics_ttl())),
        }
    }

    /// Returns the store handle.
    pub fn store(&self) -> &LineStore {
        &self.store
    }

    /// Returns the metrics cache.
    pub fn cache(&self) -> &MetricsCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
