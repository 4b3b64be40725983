//! All error types for the i18n-csv crate.
//!
//! These are returned from resource acquisition (reading the CSV source,
//! loading or writing language documents) and from guard rails such as the
//! nesting depth limit. Row-level problems are never errors; they are
//! reported as [`crate::Diagnostic`] values inside a validation result.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid document {}: {message}", path.display())]
    InvalidDocument { path: PathBuf, message: String },

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("nesting depth limit of {limit} exceeded at `{path}`")]
    DepthLimit { path: String, limit: usize },

    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Creates a new not-found error for the given path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Error::NotFound { path: path.into() }
    }

    /// Creates a new invalid-document error.
    pub fn invalid_document(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::InvalidDocument {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}
