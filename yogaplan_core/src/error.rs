//! Error types for the yogaplan_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for yogaplan_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content library validation error
    #[error("Library validation error: {0}")]
    LibraryValidation(String),

    /// Profile input was not a structured record
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
