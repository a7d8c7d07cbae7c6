//! Custom error types for the ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic validation errors (bad command input, ambiguous ids)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Amount text was empty or not a finite number
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Month text was not a well-formed `YYYY-MM`
    #[error("Invalid month: {0:?}")]
    InvalidMonth(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// An entry references a category outside the registry
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// A registry lookup used an index past the end
    #[error("Index {index} out of range (expected 0..{len})")]
    OutOfRange { index: usize, len: usize },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "not found" error for expense entries
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense entry",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for income entries
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income entry",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an invalid amount error
    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, Self::InvalidAmount(_))
    }

    /// Check if this is an invalid category error
    pub fn is_invalid_category(&self) -> bool {
        matches!(self, Self::InvalidCategory(_) | Self::OutOfRange { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::expense_not_found("3f2a9c1e");
        assert_eq!(err.to_string(), "Expense entry not found: 3f2a9c1e");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_amount_error() {
        let err = LedgerError::InvalidAmount("abc".into());
        assert_eq!(err.to_string(), "Invalid amount: \"abc\"");
        assert!(err.is_invalid_amount());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_out_of_range_counts_as_invalid_category() {
        let err = LedgerError::OutOfRange { index: 18, len: 18 };
        assert_eq!(err.to_string(), "Index 18 out of range (expected 0..18)");
        assert!(err.is_invalid_category());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
