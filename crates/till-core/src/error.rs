//! # Error Types
//!
//! ```text
//! ValidationError ──► CoreError::Validation ─┐
//! unknown count key ─► CoreError::Unknown…  ─┴─► ApiError (till-server) ─► 400 {"error": ...}
//! ```
//!
//! Messages are written for the person at the till: they name the JSON
//! field exactly as the client sent it (`totalCash`, `floatNote20`).

use thiserror::Error;

use crate::money::Money;

/// Errors from turning a request into domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A count key outside the fixed note/coin set, e.g. `note3`, or
    /// `floatNote50` (the float never holds £50 notes).
    #[error("Unknown denomination '{key}' in {table}")]
    UnknownDenomination { table: &'static str, key: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// A single field that failed its check.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Missing or `null`.
    #[error("{field} is required")]
    Required { field: String },

    /// Present but neither a number nor a numeric string.
    #[error("{field} must be a number")]
    NotANumber { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Larger in magnitude than any till could hold.
    #[error("{field} must be between -{limit} and {limit}")]
    OutOfRange { field: String, limit: Money },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownDenomination {
            table: "denominations",
            key: "note3".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown denomination 'note3' in denominations");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("totalCash").to_string(),
            "totalCash is required"
        );

        let err = ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        };
        assert_eq!(err.to_string(), "date has invalid format: expected YYYY-MM-DD");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("takings").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
