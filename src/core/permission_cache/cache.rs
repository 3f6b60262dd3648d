//! Permission cache implementation
//!
//! Session-durable memoization of authorization decisions, keyed by
//! (resource, instance id, verb). The cache is a pure memoization layer: a
//! hit never triggers network I/O, a miss is resolved by the authorization
//! gate with exactly one backend round trip.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use tracing::{debug, info};

use super::types::{AtomicCacheStats, CacheStats, PermissionKey};
use crate::storage::{FileStore, LocalStore, MemoryStore};

/// Boolean decision cache over a [`LocalStore`].
///
/// Entries have no TTL; a decision is authoritative until the whole cache is
/// cleared. There is no key-scoped invalidation: a single mutation can change
/// what the principal may do across unrelated resources, so tracking per-key
/// dependencies client-side is not attempted.
#[derive(Debug)]
pub struct PermissionCache {
    store: Arc<dyn LocalStore>,
    stats: AtomicCacheStats,
}

impl PermissionCache {
    /// Create a cache over an existing store.
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self {
            store,
            stats: AtomicCacheStats::default(),
        }
    }

    /// Create a cache over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Create a cache persisted to the JSON file at `path`.
    pub fn persistent(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(FileStore::open(path)))
    }

    /// Look up a recorded decision. Returns `None` on a miss; a storage read
    /// failure or an unparseable stored value is also a miss.
    pub fn get(&self, key: &PermissionKey) -> Option<bool> {
        let decision = match self.store.read(&key.storage_key()).as_deref() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        };

        match decision {
            Some(granted) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, granted, "permission cache hit");
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "permission cache miss");
            }
        }

        decision
    }

    /// Record a decision, overwriting any prior value for the same key.
    pub fn set(&self, key: &PermissionKey, granted: bool) {
        self.store
            .write(&key.storage_key(), if granted { "true" } else { "false" });
        self.stats.writes.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, granted, "permission cached");
    }

    /// Drop every recorded decision.
    pub fn clear(&self) {
        self.store.clear();
        self.stats.invalidations.fetch_add(1, Ordering::Relaxed);
        info!("permission cache cleared");
    }

    /// Number of recorded decisions.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no decision is recorded.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Get cache statistics (lock-free snapshot)
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}
