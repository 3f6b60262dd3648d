//! Inventory backend SDK
//!
//! This module provides the production client: the reqwest-backed
//! authorization backend, the mutation operations that invalidate the
//! permission cache, and the session operations.

pub mod client;


pub use client::{HttpAuthzBackend, InventoryClient};

/// Initialize the SDK with default logging
pub fn init() {
    tracing_subscriber::fmt::init();
}
