//! Error handling for the client
//!
//! This module defines all error types used throughout the client SDK.

use thiserror::Error;

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for the client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The backend rejected the session (HTTP 401)
    #[error("Session expired, authentication required")]
    SessionExpired,

    /// A mutation request was rejected by the backend
    #[error("Mutation rejected with status {status}")]
    MutationRejected {
        /// HTTP status code returned by the backend
        status: u16,
    },
}

impl ClientError {
    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::HttpClient(_))
    }

    /// Whether the error invalidates the whole session
    pub fn is_session_error(&self) -> bool {
        matches!(self, ClientError::SessionExpired)
    }
}
