//! # Money
//!
//! Amounts in whole pence.
//!
//! ```text
//!   JSON 250.00 ──from_decimal──► Money(25_000) ──to_decimal──► JSON 250.0
//!                                      │
//!                     counts × face value, totals, variance,
//!                     float planning: integer arithmetic only
//! ```
//!
//! A till summed in floating point drifts (`17 × 0.1 + 3 × 0.2` is
//! `2.3000000000000003`) and a drifted total never equals the expected
//! figure. Converting once at the wire and staying in `i64` keeps
//! "perfect" reachable.
//!
//! ```rust
//! use till_core::money::Money;
//!
//! let float = Money::from_cents(20_000);
//! let till = Money::from_decimal(250.0);
//! assert_eq!((till - float).to_string(), "£50.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Pence, signed: a variance below the expected figure is negative.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Converts decimal pounds from a request body, rounding to the nearest
    /// penny (halves away from zero). Input must already be finite.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(12.34).cents(), 1234);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
    /// ```
    pub fn from_decimal(pounds: f64) -> Self {
        Money((pounds * 100.0).round() as i64)
    }

    /// Decimal pounds for a response body.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Magnitude; `Money(i64::MIN)` saturates instead of overflowing.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// `self - other`, or `None` on overflow.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Face value times a count of notes or coins.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2000).multiply_quantity(7).cents(), 14_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Whole `unit`s that fit in this amount; zero unless both are positive.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1450).whole_units_of(Money::from_cents(200)), 7);
    /// ```
    #[inline]
    pub const fn whole_units_of(&self, unit: Money) -> i64 {
        if self.0 <= 0 || unit.0 <= 0 {
            0
        } else {
            self.0 / unit.0
        }
    }

    /// `self - other`, never below zero.
    #[inline]
    pub fn saturating_sub_to_zero(self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }
}

/// `£10.99`, `-£5.50`. Used in log fields and the summary prompt.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}£{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
