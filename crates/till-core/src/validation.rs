//! # Validation Module
//!
//! Input validation for everything the web client sends.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web client (JavaScript)                                      │
//! │  └── Counts default to 0, totals computed from counts                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: till-server (Rust)                                           │
//! │  ├── JSON shape (deserialization)                                      │
//! │  └── THIS MODULE: dates, required amounts, numeric checks              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE (date)                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use till_core::validation::{parse_record_date, resolve_date};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! assert_eq!(resolve_date(None, today).unwrap(), today);
//! assert!(parse_record_date("2025-13-40").is_err());
//! ```

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest magnitude accepted for any amount: £10 billion.
///
/// Keeps every sum and variance of two amounts well inside `i64` pence.
pub const MAX_AMOUNT: Money = Money::from_cents(1_000_000_000_000);

/// Wire format of a record date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Dates
// =============================================================================

/// Parses a `YYYY-MM-DD` calendar date.
///
/// ## Rules
/// - Exactly ten characters, four-digit year, two-digit month and day
/// - Must be a real calendar date (`2025-02-30` fails)
///
/// ## Example
/// ```rust
/// use till_core::validation::parse_record_date;
///
/// assert!(parse_record_date("2024-02-29").is_ok());
/// assert!(parse_record_date("2023-02-29").is_err());
/// assert!(parse_record_date("2025-6-1").is_err());
/// ```
pub fn parse_record_date(value: &str) -> ValidationResult<NaiveDate> {
    let value = value.trim();
    let invalid = || ValidationError::InvalidFormat {
        field: "date".to_string(),
        reason: format!("'{}' is not a YYYY-MM-DD calendar date", value),
    };

    let well_formed = value.len() == 10
        && value
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Resolves an optional date, falling back to `today` when absent or blank.
pub fn resolve_date(value: Option<&str>, today: NaiveDate) -> ValidationResult<NaiveDate> {
    match value.map(str::trim) {
        None | Some("") => Ok(today),
        Some(date) => parse_record_date(date),
    }
}

// =============================================================================
// Amounts
// =============================================================================

/// Converts one JSON value to money.
///
/// Numbers and numeric strings (`"250.00"`) are accepted. Returns `Ok(None)`
/// for a missing value or `null`, and `OutOfRange` beyond [`MAX_AMOUNT`].
pub fn parse_amount(field: &str, value: Option<&Value>) -> ValidationResult<Option<Money>> {
    let not_a_number = || ValidationError::NotANumber {
        field: field.to_string(),
    };

    let pounds = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(not_a_number)?,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| not_a_number())?,
        Some(_) => return Err(not_a_number()),
    };

    if !pounds.is_finite() {
        return Err(not_a_number());
    }
    if pounds.abs() > MAX_AMOUNT.to_decimal() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            limit: MAX_AMOUNT,
        });
    }

    Ok(Some(Money::from_decimal(pounds)))
}

/// Like [`parse_amount`] but the field must be present.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use till_core::validation::require_amount;
///
/// let v = json!(250.0);
/// assert_eq!(require_amount("totalCash", Some(&v)).unwrap().cents(), 25_000);
/// assert!(require_amount("totalCash", None).is_err());
/// ```
pub fn require_amount(field: &str, value: Option<&Value>) -> ValidationResult<Money> {
    parse_amount(field, value)?.ok_or_else(|| ValidationError::required(field))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_record_date() {
        assert_eq!(
            parse_record_date("2025-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert_eq!(
            parse_record_date(" 2025-06-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );

        for bad in ["2025-13-40", "2025-02-30", "01/06/2025", "2025-06-1", "", "20250601xx"] {
            assert!(
                matches!(parse_record_date(bad), Err(ValidationError::InvalidFormat { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_date_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(resolve_date(None, today).unwrap(), today);
        assert_eq!(resolve_date(Some("  "), today).unwrap(), today);
        assert_eq!(
            resolve_date(Some("2024-01-03"), today).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(
            parse_amount("takings", Some(&json!(50))).unwrap(),
            Some(Money::from_cents(5000))
        );
        assert_eq!(
            parse_amount("takings", Some(&json!("12.34"))).unwrap(),
            Some(Money::from_cents(1234))
        );
        assert_eq!(parse_amount("expectedTakings", Some(&Value::Null)).unwrap(), None);
        assert_eq!(parse_amount("expectedTakings", None).unwrap(), None);

        assert!(matches!(
            parse_amount("takings", Some(&json!("lots"))),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_amount("takings", Some(&json!([1, 2]))),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(parse_amount("takings", Some(&json!("inf"))).is_err());
    }

    #[test]
    fn test_parse_amount_rejects_huge_values() {
        assert_eq!(
            parse_amount("takings", Some(&json!(10_000_000_000.0))).unwrap(),
            Some(MAX_AMOUNT)
        );

        for huge in [json!(1e14), json!(-1e14), json!("1e300"), json!(10_000_000_000.01)] {
            let err = parse_amount("takings", Some(&huge)).unwrap_err();
            assert!(
                matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "takings"),
                "{huge} should be out of range"
            );
        }

        let err = parse_amount("totalCash", Some(&json!(1e14))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "totalCash must be between -£10000000000.00 and £10000000000.00"
        );
    }

    #[test]
    fn test_require_amount() {
        let err = require_amount("floatTotal", Some(&Value::Null)).unwrap_err();
        assert_eq!(err.to_string(), "floatTotal is required");

        // Zero is a value, not an absence.
        assert_eq!(
            require_amount("floatTotal", Some(&json!(0))).unwrap(),
            Money::zero()
        );
    }
}
