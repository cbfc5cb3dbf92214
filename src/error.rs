//! Error types and handling infrastructure for rollcall.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! The core pipeline (query engine, windowing, selection) is made of total functions and
//! never produces these errors. They only surface at the boundaries: parsing user-supplied
//! filter and sort text, loading configuration, and driving the terminal.

use thiserror::Error;

/// The main error type for rollcall operations.
#[derive(Error, Debug)]
pub enum RollcallError {
    /// Filter text that could not be turned into a filter descriptor
    #[error("Invalid filter '{input}': {reason}")]
    InvalidFilter { input: String, reason: String },

    /// Sort field name that does not correspond to a sortable column
    #[error("Unknown sort field: {name}")]
    UnknownSortField { name: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Terminal or file I/O errors
    #[error("I/O operation failed: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for rollcall operations.
pub type Result<T> = std::result::Result<T, RollcallError>;

impl RollcallError {
    /// Create an InvalidFilter error for the offending input
    pub fn invalid_filter(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFilter {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownSortField error
    pub fn unknown_sort_field(name: impl Into<String>) -> Self {
        Self::UnknownSortField { name: name.into() }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for RollcallError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "Not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            _ => "IO operation failed",
        };
        Self::Io {
            message: message.to_string(),
            source: err,
        }
    }
}
