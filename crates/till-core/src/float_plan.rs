//! # Float Planning
//!
//! Proposes which notes and coins to leave in the drawer so tomorrow's float
//! is exactly [`FLOAT_TARGET`].
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Pass 1: preferred mix, largest first                                  │
//! │  ┌──────────┬────────┬─────┐                                            │
//! │  │ Denom    │ Target │ Bag │   bagged coins (bag > 1) with a short till│
//! │  ├──────────┼────────┼─────┤   scale their target down:                │
//! │  │ £20      │   4    │  1  │     available >= bag    → target          │
//! │  │ £10      │   4    │  1  │     available >= bag/2  → 70% of available│
//! │  │ £5       │   6    │  1  │     otherwise           → 50% of available│
//! │  │ £2       │   8    │  1  │                                            │
//! │  │ £1       │  20    │ 20  │   take min(target, available,             │
//! │  │ 50p      │  20    │ 20  │            remaining / value)             │
//! │  │ 20p      │  25    │ 25  │                                            │
//! │  │ 10p      │  30    │ 50  │                                            │
//! │  │ 5p       │  20    │ 100 │                                            │
//! │  │ 2p       │  25    │ 50  │                                            │
//! │  │ 1p       │  50    │ 100 │                                            │
//! │  └──────────┴────────┴─────┘                                            │
//! │                                                                         │
//! │  Pass 2..11: top-up, largest first, with whatever is left in the till  │
//! │              stop early once remaining is zero or a pass adds nothing  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step takes at most `remaining / value` pieces, so the plan never
//! overshoots the target.
//!
//! ## Example
//! ```rust
//! use till_core::denomination::{Denomination, TillCounts};
//! use till_core::float_plan::{suggest_float, FloatOutcome};
//!
//! let mut till = TillCounts::default();
//! till.set(Denomination::Note20, 20);
//!
//! let plan = suggest_float(&till);
//! assert_eq!(plan.outcome, FloatOutcome::Exact);
//! assert_eq!(plan.counts.float_note20, 10);
//! ```

use crate::denomination::{Denomination, FloatCounts, TillCounts};
use crate::money::Money;
use crate::FLOAT_TARGET;

/// Upper bound on top-up passes after the preferred mix.
const MAX_TOP_UP_PASSES: usize = 10;

// =============================================================================
// Preferred Mix
// =============================================================================

/// How many of one denomination the preferred float holds, and how many
/// come in a bank bag of that coin.
#[derive(Debug, Clone, Copy)]
struct MixLine {
    denomination: Denomination,
    target: i64,
    bag: i64,
}

const PREFERRED_MIX: [MixLine; 11] = [
    MixLine { denomination: Denomination::Note20, target: 4, bag: 1 },
    MixLine { denomination: Denomination::Note10, target: 4, bag: 1 },
    MixLine { denomination: Denomination::Note5, target: 6, bag: 1 },
    MixLine { denomination: Denomination::Coin200, target: 8, bag: 1 },
    MixLine { denomination: Denomination::Coin100, target: 20, bag: 20 },
    MixLine { denomination: Denomination::Coin50, target: 20, bag: 20 },
    MixLine { denomination: Denomination::Coin20, target: 25, bag: 25 },
    MixLine { denomination: Denomination::Coin10, target: 30, bag: 50 },
    MixLine { denomination: Denomination::Coin5, target: 20, bag: 100 },
    MixLine { denomination: Denomination::Coin2, target: 25, bag: 50 },
    MixLine { denomination: Denomination::Coin1, target: 50, bag: 100 },
];

impl MixLine {
    /// Target scaled to what the till actually holds.
    fn target_for(&self, available: i64) -> i64 {
        if self.bag <= 1 || available >= self.bag {
            self.target
        } else if available * 2 >= self.bag {
            self.target.min(available * 7 / 10)
        } else {
            self.target.min(available * 5 / 10)
        }
    }
}

// =============================================================================
// Plan
// =============================================================================

/// Whether the suggested float reaches the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatOutcome {
    Exact,
    Short { missing: Money },
}

impl FloatOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FloatOutcome::Exact => "exact",
            FloatOutcome::Short { .. } => "short",
        }
    }

    /// Amount still needed; zero when exact.
    pub fn missing(&self) -> Money {
        match self {
            FloatOutcome::Exact => Money::zero(),
            FloatOutcome::Short { missing } => *missing,
        }
    }
}

/// A suggested float.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatPlan {
    pub counts: FloatCounts,
    pub total: Money,
    pub target: Money,
    pub outcome: FloatOutcome,
}

/// Suggests a float for [`FLOAT_TARGET`] from the counted till.
pub fn suggest_float(till: &TillCounts) -> FloatPlan {
    suggest_float_for(till, FLOAT_TARGET)
}

/// Suggests a float for an arbitrary target.
///
/// Negative till counts are treated as zero.
pub fn suggest_float_for(till: &TillCounts, target: Money) -> FloatPlan {
    let mut counts = FloatCounts::default();
    let mut remaining = target;

    for line in PREFERRED_MIX {
        if !remaining.is_positive() {
            break;
        }
        let available = till.get(line.denomination).max(0);
        let take = line
            .target_for(available)
            .min(available)
            .min(remaining.whole_units_of(line.denomination.value()));

        if take > 0 {
            counts.set(line.denomination, take);
            remaining -= line.denomination.value().multiply_quantity(take);
        }
    }

    for _ in 0..MAX_TOP_UP_PASSES {
        if !remaining.is_positive() {
            break;
        }
        let mut progress = false;

        for denomination in Denomination::FLOAT {
            if !remaining.is_positive() {
                break;
            }
            let taken = counts.get(denomination);
            let spare = till.get(denomination).max(0) - taken;
            let add = remaining.whole_units_of(denomination.value()).min(spare);

            if add > 0 {
                counts.set(denomination, taken + add);
                remaining -= denomination.value().multiply_quantity(add);
                progress = true;
            }
        }

        if !progress {
            break;
        }
    }

    let total = counts.total();
    let outcome = if total >= target {
        FloatOutcome::Exact
    } else {
        FloatOutcome::Short {
            missing: target - total,
        }
    };

    FloatPlan {
        counts,
        total,
        target,
        outcome,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn till_with_every_count(count: i64) -> TillCounts {
        let mut till = TillCounts::default();
        for d in Denomination::ALL {
            till.set(d, count);
        }
        till
    }

    #[test]
    fn test_well_stocked_till_follows_preferred_mix() {
        let plan = suggest_float(&till_with_every_count(100));

        assert_eq!(plan.outcome, FloatOutcome::Exact);
        assert_eq!(plan.total, FLOAT_TARGET);

        let c = plan.counts;
        assert_eq!(c.float_note20, 4);
        assert_eq!(c.float_note10, 4);
        assert_eq!(c.float_note5, 6);
        assert_eq!(c.float_coin200, 8);
        assert_eq!(c.float_coin100, 20);
        assert_eq!(c.float_coin50, 20);
        // Only £4.00 left by the 20p line: 20 of them, not the 25 preferred.
        assert_eq!(c.float_coin20, 20);
        assert_eq!(c.float_coin10, 0);
        assert_eq!(c.float_coin1, 0);
    }

    #[test]
    fn test_top_up_uses_remaining_notes() {
        let mut till = TillCounts::default();
        till.set(Denomination::Note20, 20);

        let plan = suggest_float(&till);
        assert_eq!(plan.outcome, FloatOutcome::Exact);
        assert_eq!(plan.counts.float_note20, 10);
        assert_eq!(plan.total, Money::from_cents(20_000));
    }

    #[test]
    fn test_short_till_reports_missing() {
        let mut till = TillCounts::default();
        till.set(Denomination::Note20, 5);

        let plan = suggest_float(&till);
        assert_eq!(plan.counts.float_note20, 5);
        assert_eq!(
            plan.outcome,
            FloatOutcome::Short {
                missing: Money::from_cents(10_000)
            }
        );
        assert_eq!(plan.outcome.missing(), Money::from_cents(10_000));
        assert_eq!(plan.outcome.as_str(), "short");
    }

    #[test]
    fn test_bagged_coin_targets_scale_with_availability() {
        let line = PREFERRED_MIX[4]; // £1, bag of 20
        assert_eq!(line.target_for(40), 20);
        assert_eq!(line.target_for(10), 7);
        assert_eq!(line.target_for(9), 4);

        let note = PREFERRED_MIX[0];
        assert_eq!(note.target_for(2), 4);
    }

    #[test]
    fn test_empty_till_and_never_overshoots() {
        let plan = suggest_float(&TillCounts::default());
        assert_eq!(plan.total, Money::zero());
        assert_eq!(plan.outcome.missing(), FLOAT_TARGET);

        let mut till = TillCounts::default();
        till.set(Denomination::Note50, 10);
        till.set(Denomination::Note20, -3);
        till.set(Denomination::Coin1, 25_000);
        let plan = suggest_float(&till);
        assert_eq!(plan.counts.get(Denomination::Note50), 0);
        assert_eq!(plan.counts.float_note20, 0);
        assert_eq!(plan.total, FLOAT_TARGET);
        assert_eq!(plan.outcome, FloatOutcome::Exact);
    }
}
