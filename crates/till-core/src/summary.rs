//! # Summary Prompt
//!
//! Turns a day's figures into the text request sent to the language model.
//! The model's reply is not parsed; whatever comes back is shown as-is.
//!
//! ## Prompt Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Role line          "You are summarising ... for a small shop."     │
//! │  2. Figures            four amounts, £-formatted                       │
//! │  3. Rules              perfect / excellent / shortage, float correct   │
//! │  4. Computed facts     classification + variance (or "no target")      │
//! │  5. Output request     two or three friendly sentences                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::money::Money;
use crate::reconciliation::{FloatStatus, Performance, Variance};
use crate::validation::{parse_amount, require_amount, ValidationResult};
use crate::FLOAT_TARGET;

// =============================================================================
// Figures
// =============================================================================

/// The four amounts a summary is written about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryFigures {
    pub total_cash: Money,
    pub takings: Money,
    pub expected_takings: Option<Money>,
    pub float_total: Money,
}

/// Raw body of `POST /api/generate-summary`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[serde(default)]
    pub total_cash: Option<Value>,
    #[serde(default)]
    pub takings: Option<Value>,
    #[serde(default)]
    pub expected_takings: Option<Value>,
    #[serde(default)]
    pub float_total: Option<Value>,
}

impl SummaryRequest {
    pub fn into_figures(self) -> ValidationResult<SummaryFigures> {
        Ok(SummaryFigures {
            total_cash: require_amount("totalCash", self.total_cash.as_ref())?,
            takings: require_amount("takings", self.takings.as_ref())?,
            expected_takings: parse_amount("expectedTakings", self.expected_takings.as_ref())?,
            float_total: require_amount("floatTotal", self.float_total.as_ref())?,
        })
    }
}

impl SummaryFigures {
    /// Classification against the expected figure, if one was given.
    pub fn performance(&self) -> Option<Performance> {
        self.expected_takings
            .map(|expected| Performance::classify(self.takings, expected))
    }

    pub fn float_status(&self) -> FloatStatus {
        FloatStatus::of(self.float_total)
    }
}

// =============================================================================
// Prompt
// =============================================================================

/// Builds the prompt for one day.
///
/// ## Example
/// ```rust
/// use till_core::money::Money;
/// use till_core::summary::{build_prompt, SummaryFigures};
///
/// let prompt = build_prompt(&SummaryFigures {
///     total_cash: Money::from_cents(25_000),
///     takings: Money::from_cents(5_000),
///     expected_takings: Some(Money::from_cents(5_000)),
///     float_total: Money::from_cents(20_000),
/// });
/// assert!(prompt.contains("Takings: £50.00"));
/// assert!(prompt.contains("Performance: perfect"));
/// ```
pub fn build_prompt(figures: &SummaryFigures) -> String {
    let expected_line = match figures.expected_takings {
        Some(expected) => format!("- Expected takings: {}", expected),
        None => "- Expected takings: not supplied".to_string(),
    };

    let mut lines = vec![
        "You are summarising the end-of-day till count for a small shop.".to_string(),
        String::new(),
        "Figures:".to_string(),
        format!("- Total cash in till: {}", figures.total_cash),
        format!("- Takings: {}", figures.takings),
        expected_line,
        format!("- Float: {}", figures.float_total),
        String::new(),
        "Rules:".to_string(),
        "- If takings equal expected takings exactly, call the day \"perfect\".".to_string(),
        "- If takings exceed expected takings, call the day \"excellent\".".to_string(),
        "- If takings are below expected takings, report a \"shortage\".".to_string(),
        format!(
            "- The float is \"correct\" when it is exactly {}; otherwise say by how much it is out.",
            FLOAT_TARGET
        ),
        String::new(),
        "Already worked out for you:".to_string(),
    ];

    match figures.expected_takings {
        Some(expected) => {
            let performance = Performance::classify(figures.takings, expected);
            let variance = Variance::between(figures.takings, expected);
            lines.push(format!("- Performance: {}", performance.as_str()));
            lines.push(match variance.percent() {
                Some(percent) => format!(
                    "- Variance: {} ({:+.1}% of expected)",
                    variance.amount, percent
                ),
                None => format!("- Variance: {}", variance.amount),
            });
        }
        None => lines.push(
            "- No expected takings target was supplied, so do not judge performance.".to_string(),
        ),
    }

    lines.push(match figures.float_status() {
        FloatStatus::Correct => "- Float: correct".to_string(),
        FloatStatus::Incorrect { difference } => {
            format!("- Float: incorrect, off by {}", difference)
        }
    });
    lines.push(String::new());
    lines.push("Write two or three short, friendly sentences for the shop owner.".to_string());

    lines.join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use serde_json::json;

    fn figures(takings: i64, expected: Option<i64>, float: i64) -> SummaryFigures {
        SummaryFigures {
            total_cash: Money::from_cents(takings + float),
            takings: Money::from_cents(takings),
            expected_takings: expected.map(Money::from_cents),
            float_total: Money::from_cents(float),
        }
    }

    #[test]
    fn test_prompt_lists_the_four_amounts() {
        let prompt = build_prompt(&figures(5_000, Some(4_000), 20_000));
        assert!(prompt.contains("Total cash in till: £250.00"));
        assert!(prompt.contains("Takings: £50.00"));
        assert!(prompt.contains("Expected takings: £40.00"));
        assert!(prompt.contains("Float: £200.00"));
    }

    #[test]
    fn test_prompt_carries_rule_words() {
        let prompt = build_prompt(&figures(5_000, Some(5_000), 20_000));
        for word in ["\"perfect\"", "\"excellent\"", "\"shortage\"", "\"correct\""] {
            assert!(prompt.contains(word), "missing {word}");
        }
        assert!(prompt.contains("exactly £200.00"));
    }

    #[test]
    fn test_prompt_computed_classification() {
        let prompt = build_prompt(&figures(5_500, Some(5_000), 20_000));
        assert!(prompt.contains("Performance: excellent"));
        assert!(prompt.contains("Variance: £5.00 (+10.0% of expected)"));
        assert!(prompt.contains("- Float: correct"));

        let prompt = build_prompt(&figures(4_000, Some(5_000), 19_500));
        assert!(prompt.contains("Performance: shortage"));
        assert!(prompt.contains("Float: incorrect, off by -£5.00"));
    }

    #[test]
    fn test_prompt_without_expected_takings() {
        let prompt = build_prompt(&figures(5_000, None, 20_000));
        assert!(prompt.contains("Expected takings: not supplied"));
        assert!(!prompt.contains("Performance:"));
        assert!(prompt.contains("do not judge performance"));
    }

    #[test]
    fn test_request_into_figures() {
        let request: SummaryRequest = serde_json::from_value(json!({
            "takings": 50.0,
            "expectedTakings": null,
            "floatTotal": "200",
            "totalCash": 250
        }))
        .unwrap();
        let figures = request.into_figures().unwrap();
        assert_eq!(figures.float_total, FLOAT_TARGET);
        assert_eq!(figures.expected_takings, None);
        assert_eq!(figures.performance(), None);

        let request: SummaryRequest =
            serde_json::from_value(json!({ "takings": 50.0, "floatTotal": 200 })).unwrap();
        assert!(matches!(
            request.into_figures(),
            Err(ValidationError::Required { ref field }) if field == "totalCash"
        ));
    }
}
