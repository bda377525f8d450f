//! # Reconciliation Rules
//!
//! How a day's count is judged: takings against the expected figure, the
//! float against its £200 target, and what goes to the bank.
//!
//! ## Decision Table
//! ```text
//! ┌──────────────────────────────┬────────────────────────────────────────┐
//! │ Comparison                   │ Result                                 │
//! ├──────────────────────────────┼────────────────────────────────────────┤
//! │ takings == expected          │ Performance::Perfect                   │
//! │ takings >  expected          │ Performance::Excellent                 │
//! │ takings <  expected          │ Performance::Shortage                  │
//! │ float_total == £200.00       │ FloatStatus::Correct                   │
//! │ float_total != £200.00       │ FloatStatus::Incorrect { difference }  │
//! │ |takings - expected| <= £5   │ Variance::within_tolerance             │
//! └──────────────────────────────┴────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//! use till_core::reconciliation::{Performance, Variance};
//!
//! let takings = Money::from_cents(5_250);
//! let expected = Money::from_cents(5_000);
//! assert_eq!(Performance::classify(takings, expected), Performance::Excellent);
//!
//! let variance = Variance::between(takings, expected);
//! assert_eq!(variance.amount.cents(), 250);
//! assert_eq!(variance.percent(), Some(5.0));
//! assert!(variance.within_tolerance);
//! ```

use serde::Serialize;

use crate::denomination::{Denomination, FloatCounts, TillCounts};
use crate::money::Money;
use crate::{FLOAT_TARGET, VARIANCE_TOLERANCE};

// =============================================================================
// Performance
// =============================================================================

/// How the day's takings compare with the expected figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Performance {
    Perfect,
    Excellent,
    Shortage,
}

impl Performance {
    pub fn classify(takings: Money, expected: Money) -> Self {
        match takings.cmp(&expected) {
            std::cmp::Ordering::Equal => Performance::Perfect,
            std::cmp::Ordering::Greater => Performance::Excellent,
            std::cmp::Ordering::Less => Performance::Shortage,
        }
    }

    /// The word used for this result in summaries.
    pub const fn as_str(self) -> &'static str {
        match self {
            Performance::Perfect => "perfect",
            Performance::Excellent => "excellent",
            Performance::Shortage => "shortage",
        }
    }
}

// =============================================================================
// Float Status
// =============================================================================

/// Whether the float left in the till matches [`FLOAT_TARGET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatStatus {
    Correct,
    /// `difference` is `float_total - target`: negative when the float is light.
    Incorrect { difference: Money },
}

impl FloatStatus {
    pub fn of(float_total: Money) -> Self {
        let difference = float_total - FLOAT_TARGET;
        if difference.is_zero() {
            FloatStatus::Correct
        } else {
            FloatStatus::Incorrect { difference }
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, FloatStatus::Correct)
    }
}

// =============================================================================
// Variance
// =============================================================================

/// Signed gap between takings and the expected figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variance {
    /// `takings - expected`.
    pub amount: Money,
    /// Percentage of expected in tenths of a percent; `None` when expected is
    /// zero or the ratio is out of range.
    pub percent_tenths: Option<i64>,
    pub within_tolerance: bool,
}

impl Variance {
    /// Never panics. A gap too large for `i64` pence saturates, and a
    /// percentage that cannot be computed is `None`.
    pub fn between(takings: Money, expected: Money) -> Self {
        let amount = takings.checked_sub(expected).unwrap_or(if takings >= expected {
            Money::from_cents(i64::MAX)
        } else {
            Money::from_cents(i64::MIN)
        });

        // Basis points first, then round half away from zero to tenths.
        let percent_tenths = amount
            .cents()
            .checked_mul(10_000)
            .and_then(|scaled| scaled.checked_div(expected.cents()))
            .map(|bps| if bps >= 0 { (bps + 5) / 10 } else { (bps - 5) / 10 });

        Variance {
            amount,
            percent_tenths,
            within_tolerance: amount.abs() <= VARIANCE_TOLERANCE,
        }
    }

    /// Percentage to one decimal place.
    pub fn percent(&self) -> Option<f64> {
        self.percent_tenths.map(|t| t as f64 / 10.0)
    }
}

/// Takings implied by a count: cash above the float, never negative.
///
/// ## Example
/// ```rust
/// use till_core::money::Money;
/// use till_core::reconciliation::takings_from;
///
/// assert_eq!(takings_from(Money::from_cents(25_000), Money::from_cents(20_000)).cents(), 5_000);
/// assert!(takings_from(Money::from_cents(15_000), Money::from_cents(20_000)).is_zero());
/// ```
pub fn takings_from(total_cash: Money, float_total: Money) -> Money {
    total_cash.saturating_sub_to_zero(float_total)
}

// =============================================================================
// Banking Breakdown
// =============================================================================

/// One denomination's share of the banking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankingLine {
    pub denomination: Denomination,
    pub in_till: i64,
    pub in_float: i64,
    pub to_bank: i64,
    pub value: Money,
}

/// What is removed from the till once the float is set aside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankingBreakdown {
    pub lines: Vec<BankingLine>,
    pub total: Money,
}

impl BankingBreakdown {
    /// Builds the breakdown. A float count above the till count banks nothing
    /// for that denomination.
    pub fn new(till: &TillCounts, float: &FloatCounts) -> Self {
        let lines: Vec<BankingLine> = till
            .iter()
            .map(|(denomination, in_till)| {
                let in_float = float.get(denomination);
                let to_bank = (in_till - in_float).max(0);
                BankingLine {
                    denomination,
                    in_till,
                    in_float,
                    to_bank,
                    value: denomination.value().multiply_quantity(to_bank),
                }
            })
            .collect();

        let total = lines.iter().map(|line| line.value).sum();
        BankingBreakdown { lines, total }
    }

    /// Lines that actually bank something.
    pub fn non_empty(&self) -> impl Iterator<Item = &BankingLine> {
        self.lines.iter().filter(|line| line.to_bank > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let fifty = Money::from_cents(5_000);
        assert_eq!(Performance::classify(fifty, fifty), Performance::Perfect);
        assert_eq!(
            Performance::classify(fifty + Money::from_cents(1), fifty),
            Performance::Excellent
        );
        assert_eq!(
            Performance::classify(fifty - Money::from_cents(1), fifty),
            Performance::Shortage
        );
        assert_eq!(Performance::Shortage.as_str(), "shortage");
    }

    #[test]
    fn test_float_status() {
        assert_eq!(FloatStatus::of(Money::from_cents(20_000)), FloatStatus::Correct);
        assert_eq!(
            FloatStatus::of(Money::from_cents(19_950)),
            FloatStatus::Incorrect {
                difference: Money::from_cents(-50)
            }
        );
        assert!(!FloatStatus::of(Money::zero()).is_correct());
    }

    #[test]
    fn test_variance() {
        let v = Variance::between(Money::from_cents(4_500), Money::from_cents(5_000));
        assert_eq!(v.amount.cents(), -500);
        assert_eq!(v.percent(), Some(-10.0));
        assert!(v.within_tolerance);

        let v = Variance::between(Money::from_cents(4_499), Money::from_cents(5_000));
        assert!(!v.within_tolerance);

        // 1/3 of expected: 3333 bps -> 33.3%
        let v = Variance::between(Money::from_cents(400), Money::from_cents(300));
        assert_eq!(v.percent_tenths, Some(333));

        let v = Variance::between(Money::from_cents(100), Money::zero());
        assert_eq!(v.percent(), None);
    }

    #[test]
    fn test_variance_at_the_edges_of_i64() {
        let v = Variance::between(Money::from_cents(i64::MAX), Money::from_cents(-1));
        assert_eq!(v.amount.cents(), i64::MAX);
        assert_eq!(v.percent_tenths, None);
        assert!(!v.within_tolerance);

        let v = Variance::between(Money::from_cents(i64::MIN), Money::from_cents(1));
        assert_eq!(v.amount.cents(), i64::MIN);
        assert_eq!(v.percent_tenths, None);
        assert!(!v.within_tolerance);

        // Amount fits but amount * 10_000 does not.
        let v = Variance::between(Money::from_cents(i64::MAX / 2), Money::from_cents(100));
        assert_eq!(v.percent_tenths, None);
    }

    #[test]
    fn test_banking_breakdown() {
        let mut till = TillCounts::default();
        till.set(Denomination::Note50, 2);
        till.set(Denomination::Note20, 12);
        till.set(Denomination::Coin1, 3);

        let mut float = FloatCounts::default();
        float.set(Denomination::Note20, 10);
        float.set(Denomination::Coin1, 5);

        let breakdown = BankingBreakdown::new(&till, &float);
        assert_eq!(breakdown.lines.len(), 12);
        assert_eq!(breakdown.total, Money::from_cents(10_000 + 4_000));

        let banked: Vec<_> = breakdown.non_empty().map(|l| l.denomination).collect();
        assert_eq!(banked, vec![Denomination::Note50, Denomination::Note20]);

        let pennies = breakdown
            .lines
            .iter()
            .find(|l| l.denomination == Denomination::Coin1)
            .unwrap();
        assert_eq!(pennies.to_bank, 0);
    }
}
