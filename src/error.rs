//! Error types and handling infrastructure for viewfinder.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary layers `anyhow` on top for context.
//!
//! ## Design Principles
//!
//! - **Narrow failure surface**: gesture, zoom, swipe and orientation handlers never fail;
//!   malformed input degrades to a no-op
//! - **Fatal only at the edges**: activation, configuration loading and trace parsing
//! - **Consistency**: Standardized Result type across all modules

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for viewfinder operations.
#[derive(Error, Debug)]
pub enum ViewfinderError {
    /// The orientation sensor subscription could not be established at activation
    #[error("Orientation sensor unavailable: {message}")]
    SensorUnavailable { message: String },

    /// The capture pipeline handle could not be bound at activation
    #[error("Capture pipeline unavailable: {message}")]
    CaptureUnavailable { message: String },

    /// Configuration file could not be read or holds invalid values
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// A line of a replay trace could not be parsed
    #[error("Invalid trace at line {line}: {message}")]
    InvalidTrace { line: usize, message: String },

    /// Thumbnail worker channel closed
    #[error("Thumbnail worker unavailable")]
    WorkerUnavailable,

    /// Thumbnail decoding failed; never surfaced past the worker boundary
    #[error("Thumbnail decode failed for {uri}: {message}")]
    DecodeFailed { uri: String, message: String },

    /// File system related errors
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration path could not be resolved
    #[error("No configuration directory available for {path}")]
    NoConfigDir { path: PathBuf },
}

/// Standard Result type for viewfinder operations.
pub type Result<T> = std::result::Result<T, ViewfinderError>;

impl ViewfinderError {
    /// Create a SensorUnavailable error with a descriptive message
    pub fn sensor(message: impl Into<String>) -> Self {
        Self::SensorUnavailable {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidTrace error for the given 1-based line
    pub fn trace(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidTrace {
            line,
            message: message.into(),
        }
    }

    /// Create a DecodeFailed error for a media item
    pub fn decode(uri: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DecodeFailed {
            uri: uri.into(),
            message: message.into(),
        }
    }

    /// Whether the error came from activation and should be handed to the host to decide
    /// between retrying and disabling orientation/focus behavior
    pub fn is_activation_failure(&self) -> bool {
        matches!(
            self,
            Self::SensorUnavailable { .. } | Self::CaptureUnavailable { .. }
        )
    }
}

impl From<std::io::Error> for ViewfinderError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "File not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            _ => "IO operation failed",
        };
        Self::FileError {
            message: message.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let sensor = ViewfinderError::sensor("no accelerometer");
        assert_eq!(
            sensor.to_string(),
            "Orientation sensor unavailable: no accelerometer"
        );

        let trace = ViewfinderError::trace(3, "unknown verb `hop`");
        assert_eq!(
            trace.to_string(),
            "Invalid trace at line 3: unknown verb `hop`"
        );

        assert_eq!(
            ViewfinderError::WorkerUnavailable.to_string(),
            "Thumbnail worker unavailable"
        );
    }

    #[test]
    fn test_activation_failures_are_flagged() {
        assert!(ViewfinderError::sensor("x").is_activation_failure());
        let capture = ViewfinderError::CaptureUnavailable {
            message: "x".to_string(),
        };
        assert!(capture.is_activation_failure());
        assert!(!ViewfinderError::config("x").is_activation_failure());
        assert!(!ViewfinderError::WorkerUnavailable.is_activation_failure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ViewfinderError = io_err.into();

        match err {
            ViewfinderError::FileError { message, .. } => {
                assert_eq!(message, "File not found");
            }
            _ => panic!("Expected FileError variant"),
        }
    }
}
