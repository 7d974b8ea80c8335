//! Core error types for cogload-core.
//!
//! Categorical and numeric edge cases (unknown labels, short meetings,
//! overlapping meetings, empty days) are absorbed where they occur and never
//! show up here. What remains are the structural failures a caller has to
//! know about: unparseable timestamps, out-of-order input, bad configuration
//! and a failing classification collaborator.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cogload-core.
///
/// Returned by entry points that read, parse and score in one call.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Structural problems with the meeting sequence handed to the pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A start or end timestamp could not be parsed as RFC 3339.
    #[error("Invalid timestamp in meeting '{meeting_id}' ({field} = {value:?}): {message}")]
    InvalidTimestamp {
        meeting_id: String,
        field: &'static str,
        value: String,
        message: String,
    },

    /// A meeting starts before the meeting preceding it.
    #[error("Meeting at index {index} starts at {start}, before its predecessor at {previous_start}")]
    OutOfOrder {
        index: usize,
        previous_start: chrono::DateTime<chrono::FixedOffset>,
        start: chrono::DateTime<chrono::FixedOffset>,
    },
}

/// Errors raised by a classification collaborator.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The classifier could not produce a classification for a meeting.
    #[error("Failed to classify meeting '{meeting_id}': {message}")]
    Failed { meeting_id: String, message: String },

    /// A classification task panicked or was cancelled.
    #[error("Classification task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
