//! Custom error types for the rollover ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::MonthPeriod;

/// The main error type for rollover ledger operations
#[derive(Error, Debug)]
pub enum RolloverError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A table row whose cells cannot be read as the expected types
    #[error("Invalid row in table '{table}': {reason}")]
    InvalidRow { table: String, reason: String },

    /// A reset was requested for a month that has not started yet
    #[error("Cannot reset rollover for a future date: {period} is after {current}")]
    FutureStart {
        period: MonthPeriod,
        current: MonthPeriod,
    },

    /// A sum or balance exceeded the range of the money type
    #[error("Amount overflow: {0}")]
    Overflow(String),

    /// Tabular store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl RolloverError {
    /// Create a "not found" error for an expense category missing from ExpenseData
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a ledger entry
    pub fn rollover_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Rollover",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a table
    pub fn table_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Table",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a named range
    pub fn range_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Named range",
            identifier: identifier.into(),
        }
    }

    /// Create an invalid row error
    pub fn invalid_row(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRow {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::FutureStart { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for RolloverError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RolloverError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for RolloverError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for rollover ledger operations
pub type RolloverResult<T> = Result<T, RolloverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RolloverError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = RolloverError::expense_not_found("Groceries");
        assert_eq!(err.to_string(), "Expense not found: Groceries");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_future_start_error() {
        let err = RolloverError::FutureStart {
            period: MonthPeriod::new(2099, 12).unwrap(),
            current: MonthPeriod::new(2024, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot reset rollover for a future date: 2099-12 is after 2024-01"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_overflow_error() {
        let err = RolloverError::Overflow("EOM of Groceries 2024-01".into());
        assert_eq!(err.to_string(), "Amount overflow: EOM of Groceries 2024-01");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RolloverError = io_err.into();
        assert!(matches!(err, RolloverError::Io(_)));
    }
}
