//! Per-task memoisation of discovery results.
//!
//! Caches the final ranked result list keyed by (task name, configuration
//! fingerprint). Uses [`moka`] for TTL-based expiry and bounded size. A hit
//! replays the stored results without running any stage, so repeated
//! calls within one task run neither re-search nor touch the execution
//! records.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use discover_search::SearchResult;
use moka::sync::Cache;

use crate::config::DiscoverConfig;
use crate::error::{DiscoverError, Result};

/// Maximum number of cached result sets.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Default time a cached result set stays valid.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Composite cache key: task name + configuration hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    task: String,
    config_hash: u64,
}

impl CacheKey {
    /// Build a deterministic key for `config` running under `task`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoverError::Config`] if the configuration cannot be
    /// serialized for hashing.
    pub fn new(task: &str, config: &DiscoverConfig) -> Result<Self> {
        let canonical = serde_json::to_string(config)
            .map_err(|e| DiscoverError::Config(format!("cannot fingerprint config: {e}")))?;
        let mut hasher = DefaultHasher::new();
        canonical.hash(&mut hasher);
        Ok(Self {
            task: task.to_owned(),
            config_hash: hasher.finish(),
        })
    }
}

/// Bounded, expiring store of discovery results.
#[derive(Clone)]
pub struct DiscoverCache {
    inner: Cache<CacheKey, Vec<SearchResult>>,
}

impl DiscoverCache {
    /// Create a cache whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(MAX_CACHE_ENTRIES)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Look up cached results. Returns `None` on miss.
    pub fn get(&self, key: &CacheKey) -> Option<Vec<SearchResult>> {
        self.inner.get(key)
    }

    /// Store results under `key`, replacing any previous entry.
    pub fn insert(&self, key: CacheKey, results: Vec<SearchResult>) {
        self.inner.insert(key, results);
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }
}

impl Default for DiscoverCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl std::fmt::Debug for DiscoverCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoverCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}
