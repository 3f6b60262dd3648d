//! Authorization decision cache
//!
//! This module provides the session-durable permission cache consulted by
//! the authorization gate before any backend round trip.

pub mod cache;
pub mod types;


pub use cache::PermissionCache;
pub use types::{AtomicCacheStats, CacheStats, PermissionKey, Verb};
