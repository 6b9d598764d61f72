//! Error types
//!
//! `NavigationError` covers the navigation core (classification, discovery, tree
//! build). `ApiError` is the application-level error surfaced by the CLI, the
//! watcher and the server runner.

use thiserror::Error;

/// Errors raised while discovering content and building navigation trees
#[derive(Debug, Error)]
pub enum NavigationError {
    /// A relative path had no usable segments
    #[error("Invalid content path: {0:?}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("Watch error: {0}")]
    WatchError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
