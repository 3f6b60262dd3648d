//! # labstock-client
//!
//! Client SDK for the LabStock laboratory chemical inventory backend.
//!
//! Every action a user may take against the backend (listing products,
//! editing an entity, deleting a storage, ...) is gated by a per-(resource,
//! instance, verb) authorization decision. Fetching each decision costs a
//! round trip, so this crate centers on a cache-first check protocol:
//!
//! - **PermissionCache**: session-durable memoization of decisions, backed
//!   by an in-memory or file-persisted store
//! - **AuthorizationGate**: resolves a check from the cache when possible,
//!   with exactly one backend round trip on a miss, and drives the caller's
//!   reveal callbacks
//! - **InventoryClient**: the production client, wiring mutations and
//!   credential changes to full-cache invalidation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use labstock_client::{ConfigBuilder, InventoryClient, Verb};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigBuilder::new("https://chem.example.org")
//!         .cache_path("/var/cache/labstock/permissions.json")
//!         .build();
//!
//!     let client = InventoryClient::new(config)?
//!         .with_session_expired_hook(|| eprintln!("session expired, please log in"));
//!
//!     client.login("admin@example.org", "secret").await?;
//!
//!     // Decide which controls to show.
//!     if client.can("products", "-2", Verb::Get).await {
//!         println!("user may browse products");
//!     }
//!
//!     // A successful write invalidates every cached decision.
//!     client
//!         .update("entities", "7", &serde_json::json!({"entity_name": "lab A"}))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod config;
pub mod core;
pub mod sdk;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::{ClientConfig, ClientSettings, ConfigBuilder};
pub use core::authz_gate::{AuthorizationGate, AuthzBackend, BackendVerdict, CheckOutcome};
pub use core::permission_cache::{CacheStats, PermissionCache, PermissionKey, Verb};
pub use sdk::{HttpAuthzBackend, InventoryClient, init};
pub use storage::{FileStore, LocalStore, MemoryStore};
pub use utils::error::{ClientError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
