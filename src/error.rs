//! Custom error types for gastos
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::backend::BackendError;

/// The main error type for gastos operations
#[derive(Error, Debug)]
pub enum GastosError {
    /// Local validation failed; the backend was never contacted
    #[error("Validation error: {0}")]
    Validation(String),

    /// A backend call failed (transport, status or decoding)
    #[error("{0}")]
    Fetch(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl GastosError {
    /// Create a fetch error carrying a short, human-readable message
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a fetch error
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}

impl From<std::io::Error> for GastosError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GastosError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<BackendError> for GastosError {
    fn from(err: BackendError) -> Self {
        Self::Fetch(err.to_string())
    }
}

/// Result type alias for gastos operations
pub type GastosResult<T> = Result<T, GastosError>;
