//! Client configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::utils::error::{ClientError, Result};

/// Configuration for an [`InventoryClient`](crate::sdk::InventoryClient).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// Base URL of the inventory backend, e.g. `https://chem.example.org`
    pub base_url: String,
    /// Settings
    pub settings: ClientSettings,
}

/// Settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Request timeout in seconds. A timed-out authorization check resolves
    /// to denied without a cache write.
    pub timeout: u64,
    /// Path of the persistent permission cache file. `None` keeps decisions
    /// in memory for the lifetime of the client.
    pub cache_path: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: 10,
            cache_path: None,
        }
    }
}

/// Configuration builder
pub struct ConfigBuilder {
    config: ClientConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new(base_url: &str) -> Self {
        Self {
            config: ClientConfig {
                base_url: base_url.to_string(),
                settings: ClientSettings::default(),
            },
        }
    }

    /// Request timeout in seconds
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.config.settings.timeout = timeout;
        self
    }

    /// Persist cached permission decisions to `path`
    pub fn cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.settings.cache_path = Some(path.into());
        self
    }

    /// Finalize the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl ClientConfig {
    /// Load the configuration from environment variables.
    ///
    /// `LABSTOCK_BASE_URL` is required; `LABSTOCK_CACHE_PATH` and
    /// `LABSTOCK_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("LABSTOCK_BASE_URL").map_err(|_| {
            ClientError::Config(
                "No backend configured. Please set the LABSTOCK_BASE_URL environment variable."
                    .to_string(),
            )
        })?;

        let mut builder = ConfigBuilder::new(&base_url);

        if let Ok(path) = std::env::var("LABSTOCK_CACHE_PATH") {
            builder = builder.cache_path(path);
        }

        if let Ok(timeout) = std::env::var("LABSTOCK_TIMEOUT_SECS") {
            let timeout = timeout.parse().map_err(|_| {
                ClientError::Config(format!("Invalid LABSTOCK_TIMEOUT_SECS: {}", timeout))
            })?;
            builder = builder.timeout(timeout);
        }

        Ok(builder.build())
    }

    /// Load the configuration from a YAML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            ClientError::Config(format!("Failed to parse config file {}: {}", path, e))
        })
    }
}
