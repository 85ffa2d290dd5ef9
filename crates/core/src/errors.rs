//! Core error types for the allocation engine.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! are converted to these types by repository implementations.

use std::num::ParseFloatError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the allocation engine.
///
/// The read path (aggregation/rollup) is deliberately lenient and rarely
/// produces errors; the write path (saving strategy allocations) raises
/// explicitly and never partially persists.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The cash remainder rule depends on the Cash sentinel asset class;
    /// its absence from reference data is a configuration error, not a
    /// degenerate case.
    #[error("Cash asset class '{0}' not found in reference data")]
    CashAssetClassNotFound(String),

    /// An internal consistency check failed. This indicates a logic bug,
    /// never bad user input.
    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Record not found: {0}")]
    NotFound(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to parse number: {0}")]
    NumberParse(#[from] ParseFloatError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
