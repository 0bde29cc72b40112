//! Domain error types
//!
//! This module defines the error hierarchy for Meridian. All errors are
//! domain-specific and don't expose third-party types.

use std::path::PathBuf;
use thiserror::Error;

/// Main Meridian error type
///
/// This is the primary error type used throughout the application.
/// Exactly one of (success result, error) is ever surfaced to the caller;
/// the pipeline never returns a partial result alongside a failure.
#[derive(Debug, Error)]
pub enum MeridianError {
    /// Invalid pipeline input (empty layer list, missing output path)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A layer failed to stage into the intermediate container
    ///
    /// Carries the layer's resolved (collision-free) container name and
    /// the underlying cause.
    #[error("Failed to stage layer '{layer}': {message}")]
    Staging { layer: String, message: String },

    /// An expected artifact is missing despite no reported error upstream
    #[error("Expected artifact was not produced: {}", expected.display())]
    Integrity { expected: PathBuf },

    /// Format-conversion service failure
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Intermediate container codec errors
    #[error("Container error: {0}")]
    Container(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for MeridianError {
    fn from(err: std::io::Error) -> Self {
        MeridianError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MeridianError {
    fn from(err: serde_json::Error) -> Self {
        MeridianError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MeridianError {
    fn from(err: toml::de::Error) -> Self {
        MeridianError::Configuration(format!("TOML parse error: {err}"))
    }
}
