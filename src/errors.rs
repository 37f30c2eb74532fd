//! Error types for ragchat
//!
//! Every failure is either a missing/malformed setting or a failure reported
//! by one of the two external services. Service errors are carried as text so
//! callers see the service's own message unchanged.

use thiserror::Error;

/// Main error type for retrieval and chat operations
#[derive(Error, Debug)]
pub enum RagError {
    /// A required setting was absent or empty
    #[error("Missing required setting: {key}")]
    ConfigurationMissing { key: String },

    /// Settings file unreadable, unparsable, or a setting malformed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search request failed in transport or was rejected by the service
    #[error("Search service failure: {0}")]
    SearchServiceFailure(String),

    /// Chat completion request failed in transport or was rejected by the service
    #[error("Completion service failure: {0}")]
    CompletionServiceFailure(String),

    /// Console I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl RagError {
    /// Shorthand for a missing setting
    pub fn missing(key: impl Into<String>) -> Self {
        RagError::ConfigurationMissing { key: key.into() }
    }
}

/// Result type alias for ragchat operations
pub type Result<T> = std::result::Result<T, RagError>;
