//! Error types for survey-recorder.
//!
//! This module defines all error types used throughout the crate. The HTTP
//! layer decides how each kind is reported to the submitter; see
//! [`Error::is_client_error`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for survey-recorder operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Submission Errors ===
    /// One of the required form fields was absent or blank after trimming.
    #[error("missing required input: {field}")]
    MissingRequiredField {
        /// Name of the form field.
        field: &'static str,
    },

    /// A required numeric field could not be parsed.
    #[error("field '{field}' is not a valid {expected}: {value:?}")]
    UnparseableNumeric {
        /// Name of the form field.
        field: &'static str,
        /// The kind of number that was expected.
        expected: &'static str,
        /// The trimmed value that was submitted.
        value: String,
        /// Whether strict numeric validation was in effect.
        strict: bool,
    },

    // === Record Store Errors ===
    /// Failed to append a row to the record store.
    #[error("failed to append to record store at {path}: {source}")]
    StoreAppend {
        /// Path to the backing file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the record store file.
    #[error("failed to initialize record store at {path}: {source}")]
    StoreInit {
        /// Path to the backing file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// Failed to bind the listening socket.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that couldn't be bound.
        addr: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for survey-recorder operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a missing field error.
    #[must_use]
    pub fn missing(field: &'static str) -> Self {
        Self::MissingRequiredField { field }
    }

    /// Create an unparseable number error.
    #[must_use]
    pub fn unparseable(
        field: &'static str,
        expected: &'static str,
        value: impl Into<String>,
        strict: bool,
    ) -> Self {
        Self::UnparseableNumeric {
            field,
            expected,
            value: value.into(),
            strict,
        }
    }

    /// Check if this error is attributable to the submitted form.
    ///
    /// Unparseable numbers only count when strict validation was enabled;
    /// otherwise they are reported as server failures.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::MissingRequiredField { .. } => true,
            Self::UnparseableNumeric { strict, .. } => *strict,
            _ => false,
        }
    }

    /// Check if this error is a missing required field.
    #[must_use]
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingRequiredField { .. })
    }
}
