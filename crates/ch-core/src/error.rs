//! # AppError
//!
//! Centralized error handling for the campus hub crates.
//! Unknown record kinds and unknown tabs are fallbacks, not errors; what
//! remains here is rejected input and infrastructure failures.

use thiserror::Error;

/// The primary error type for all ch-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Resource not found (e.g., no record with the requested id)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., empty comment text)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("configuration error: {0}")]
    Config(String),

    /// Infrastructure failure (e.g., the record source is unreachable)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for campus hub logic.
pub type Result<T> = std::result::Result<T, AppError>;
