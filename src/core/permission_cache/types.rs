//! Permission cache type definitions
//!
//! This module contains the permission key value type, the HTTP verb used as
//! an authorization action, and the cache statistics types.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// HTTP method representing the action being authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    /// Read a resource or collection
    Get,
    /// Create a resource
    Post,
    /// Update a resource
    Put,
    /// Delete a resource
    Delete,
}

impl Verb {
    /// Uppercase wire form, as used in storage keys and HTTP requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }

    /// The corresponding HTTP request method.
    pub fn method(&self) -> reqwest::Method {
        match self {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "DELETE" => Ok(Verb::Delete),
            other => Err(format!("unknown verb: {}", other)),
        }
    }
}

/// Identifies one authorization decision: a resource collection, an instance
/// within it, and the action being performed.
///
/// The instance id is an opaque string. Besides concrete entity identifiers
/// the backend understands two sentinels, `"-1"` (no specific instance) and
/// `"-2"` (collection level), and the empty string used by creation checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionKey {
    /// Collection name, e.g. "products" or "storages"
    pub resource: String,
    /// Instance identifier or sentinel
    pub instance_id: String,
    /// Action being authorized
    pub verb: Verb,
}

/// Sentinel id for a generic, no-specific-instance check.
pub const INSTANCE_ANY: &str = "-1";
/// Sentinel id for a collection-level check.
pub const INSTANCE_COLLECTION: &str = "-2";

impl PermissionKey {
    /// Key for a concrete instance.
    pub fn new(
        resource: impl Into<String>,
        instance_id: impl Into<String>,
        verb: Verb,
    ) -> Self {
        Self {
            resource: resource.into(),
            instance_id: instance_id.into(),
            verb,
        }
    }

    /// Key for a generic check against any instance of `resource`.
    pub fn generic(resource: impl Into<String>, verb: Verb) -> Self {
        Self::new(resource, INSTANCE_ANY, verb)
    }

    /// Key for a collection-level check on `resource`.
    pub fn collection(resource: impl Into<String>, verb: Verb) -> Self {
        Self::new(resource, INSTANCE_COLLECTION, verb)
    }

    /// Key for a creation check, carrying an empty instance id.
    pub fn creation(resource: impl Into<String>) -> Self {
        Self::new(resource, "", Verb::Post)
    }

    /// Flat serialization used as the storage key.
    pub fn storage_key(&self) -> String {
        format!("{}:{}:{}", self.resource, self.instance_id, self.verb)
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.resource, self.instance_id, self.verb)
    }
}

/// Atomic cache statistics for lock-free hot path updates
#[derive(Debug, Default)]
pub struct AtomicCacheStats {
    /// Lookups answered from the cache
    pub hits: AtomicU64,
    /// Lookups with no recorded decision
    pub misses: AtomicU64,
    /// Decisions written
    pub writes: AtomicU64,
    /// Full-cache clears
    pub invalidations: AtomicU64,
}

/// Cache statistics snapshot (returned to callers)
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups with no recorded decision
    pub misses: u64,
    /// Decisions written
    pub writes: u64,
    /// Full-cache clears
    pub invalidations: u64,
}

impl CacheStats {
    /// Fraction of lookups answered without a backend round trip.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl AtomicCacheStats {
    /// Create a snapshot of current stats
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }

    /// Reset all stats to zero
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
        self.invalidations.store(0, Ordering::Relaxed);
    }
}
