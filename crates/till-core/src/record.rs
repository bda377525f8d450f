//! # Daily Till Records
//!
//! The one record kept per trading day, the submission that writes it, and
//! the JSON view the web client reads back.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  POST /api/records body                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TillSubmissionRequest  (raw JSON: optional date, loose numbers, maps) │
//! │       │  into_submission(today)  ← validation happens here             │
//! │       ▼                                                                 │
//! │  TillSubmission         (typed: NaiveDate, Money, fixed counts)        │
//! │       │  TillRecordRepository::upsert                                  │
//! │       ▼                                                                 │
//! │  DailyTillRecord        (stored: + id, created_at)                     │
//! │       │  TillRecordView::from                                          │
//! │       ▼                                                                 │
//! │  TillRecordView         (JSON: camelCase, decimal pounds)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::denomination::{FloatCounts, TillCounts};
use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::{parse_amount, require_amount, resolve_date, DATE_FORMAT};

// =============================================================================
// Submission
// =============================================================================

/// A validated write for one day.
///
/// Every field replaces what is stored; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TillSubmission {
    pub date: NaiveDate,
    pub total_cash: Money,
    pub float_total: Money,
    pub takings: Money,
    pub expected_takings: Option<Money>,
    pub denominations: TillCounts,
    pub floats: FloatCounts,
}

/// Raw body of `POST /api/records`.
///
/// Amounts stay as JSON values so a missing, null or non-numeric total is
/// reported as a validation error naming the field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TillSubmissionRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub total_cash: Option<Value>,
    #[serde(default)]
    pub float_total: Option<Value>,
    #[serde(default)]
    pub takings: Option<Value>,
    #[serde(default)]
    pub expected_takings: Option<Value>,
    #[serde(default)]
    pub denominations: Option<BTreeMap<String, i64>>,
    #[serde(default)]
    pub floats: Option<BTreeMap<String, i64>>,
}

impl TillSubmissionRequest {
    /// Validates the request into a submission.
    ///
    /// ## Arguments
    /// * `today` - Date used when the request carries none
    ///
    /// ## Errors
    /// - `ValidationError::Required` / `NotANumber` for the three totals
    /// - `ValidationError::InvalidFormat` for a bad date
    /// - `CoreError::UnknownDenomination` for a key outside the fixed set
    pub fn into_submission(self, today: NaiveDate) -> CoreResult<TillSubmission> {
        let date = resolve_date(self.date.as_deref(), today)?;
        let total_cash = require_amount("totalCash", self.total_cash.as_ref())?;
        let float_total = require_amount("floatTotal", self.float_total.as_ref())?;
        let takings = require_amount("takings", self.takings.as_ref())?;
        let expected_takings = parse_amount("expectedTakings", self.expected_takings.as_ref())?;

        let denominations = TillCounts::from_map(&self.denominations.unwrap_or_default())?;
        let floats = FloatCounts::from_map(&self.floats.unwrap_or_default())?;

        Ok(TillSubmission {
            date,
            total_cash,
            float_total,
            takings,
            expected_takings,
            denominations,
            floats,
        })
    }
}

// =============================================================================
// Stored Record
// =============================================================================

/// A stored day, as read back from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTillRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub total_cash: Money,
    pub float_total: Money,
    pub takings: Money,
    pub expected_takings: Option<Money>,
    pub denominations: TillCounts,
    pub float_denominations: FloatCounts,
}

// =============================================================================
// JSON View
// =============================================================================

/// What the web client receives for a stored day.
///
/// ```json
/// {
///   "id": 1, "date": "2025-06-01", "createdAt": "2025-06-01T17:02:11.000000Z",
///   "totalCash": 250.0, "floatTotal": 200.0, "takings": 50.0,
///   "expectedTakings": null,
///   "denominations": { "note50": 0, ... },
///   "floatDenominations": { "floatNote20": 10, ... }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TillRecordView {
    pub id: i64,
    pub date: String,
    pub created_at: String,
    pub total_cash: f64,
    pub float_total: f64,
    pub takings: f64,
    pub expected_takings: Option<f64>,
    pub denominations: TillCounts,
    pub float_denominations: FloatCounts,
}

impl From<&DailyTillRecord> for TillRecordView {
    fn from(record: &DailyTillRecord) -> Self {
        TillRecordView {
            id: record.id,
            date: record.date.format(DATE_FORMAT).to_string(),
            created_at: record.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            total_cash: record.total_cash.to_decimal(),
            float_total: record.float_total.to_decimal(),
            takings: record.takings.to_decimal(),
            expected_takings: record.expected_takings.map(|m| m.to_decimal()),
            denominations: record.denominations,
            float_denominations: record.float_denominations,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use chrono::TimeZone;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn request(body: Value) -> TillSubmissionRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_full_request_into_submission() {
        let submission = request(json!({
            "date": "2025-06-01",
            "totalCash": 250.00,
            "floatTotal": 200.00,
            "takings": 50.00,
            "expectedTakings": 50.00,
            "denominations": { "note20": 10, "coin100": 50 },
            "floats": { "floatNote20": 10 }
        }))
        .into_submission(today())
        .unwrap();

        assert_eq!(submission.date, today());
        assert_eq!(submission.total_cash, Money::from_cents(25_000));
        assert_eq!(submission.takings, Money::from_cents(5_000));
        assert_eq!(submission.expected_takings, Some(submission.takings));
        assert_eq!(submission.denominations.note20, 10);
        assert_eq!(submission.denominations.coin100, 50);
        assert_eq!(submission.denominations.note50, 0);
        assert_eq!(submission.floats.float_note20, 10);
        assert_eq!(submission.floats.total(), Money::from_cents(20_000));
    }

    #[test]
    fn test_minimal_request_defaults() {
        let submission = request(json!({
            "totalCash": 0,
            "floatTotal": 0,
            "takings": 0
        }))
        .into_submission(today())
        .unwrap();

        assert_eq!(submission.date, today());
        assert_eq!(submission.expected_takings, None);
        assert_eq!(submission.denominations, TillCounts::default());
        assert_eq!(submission.floats, FloatCounts::default());
    }

    #[test]
    fn test_missing_total_is_rejected() {
        let err = request(json!({ "totalCash": 10, "floatTotal": 0 }))
            .into_submission(today())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "takings"
        ));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let err = request(json!({
            "date": "2025-13-40",
            "totalCash": 1, "floatTotal": 0, "takings": 1
        }))
        .into_submission(today())
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_unknown_denomination_is_rejected() {
        let err = request(json!({
            "totalCash": 1, "floatTotal": 0, "takings": 1,
            "denominations": { "note25": 1 }
        }))
        .into_submission(today())
        .unwrap_err();
        assert!(matches!(err, CoreError::UnknownDenomination { .. }));
    }

    #[test]
    fn test_view_rendering() {
        let record = DailyTillRecord {
            id: 7,
            date: today(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 17, 30, 0).unwrap(),
            total_cash: Money::from_cents(25_012),
            float_total: Money::from_cents(20_000),
            takings: Money::from_cents(5_012),
            expected_takings: None,
            denominations: TillCounts::default(),
            float_denominations: FloatCounts::default(),
        };

        let json = serde_json::to_value(TillRecordView::from(&record)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["date"], "2025-06-01");
        assert_eq!(json["createdAt"], "2025-06-01T17:30:00.000000Z");
        assert_eq!(json["totalCash"], 250.12);
        assert_eq!(json["takings"], 50.12);
        assert!(json["expectedTakings"].is_null());
        assert_eq!(json["denominations"]["coin200"], 0);
        assert_eq!(json["floatDenominations"]["floatCoin1"], 0);
    }
}
