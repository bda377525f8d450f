//! # Denominations
//!
//! The fixed set of sterling notes and coins the till holds, and the two
//! count tables built on it.
//!
//! ## Key / Column Table
//! ```text
//! ┌──────────────┬───────┬────────────┬──────────────┬──────────────────────┐
//! │ Denomination │ Value │ Till key   │ Float key    │ Columns              │
//! ├──────────────┼───────┼────────────┼──────────────┼──────────────────────┤
//! │ Note50       │ £50   │ note50     │ (none)       │ note50_count         │
//! │ Note20       │ £20   │ note20     │ floatNote20  │ (float_)note20_count │
//! │ Note10       │ £10   │ note10     │ floatNote10  │ (float_)note10_count │
//! │ Note5        │ £5    │ note5      │ floatNote5   │ (float_)note5_count  │
//! │ Coin200      │ £2    │ coin200    │ floatCoin200 │ (float_)coin200_count│
//! │ Coin100      │ £1    │ coin100    │ floatCoin100 │ (float_)coin100_count│
//! │ Coin50       │ 50p   │ coin50     │ floatCoin50  │ ...                  │
//! │ Coin20       │ 20p   │ coin20     │ floatCoin20  │                      │
//! │ Coin10       │ 10p   │ coin10     │ floatCoin10  │                      │
//! │ Coin5        │ 5p    │ coin5      │ floatCoin5   │                      │
//! │ Coin2        │ 2p    │ coin2      │ floatCoin2   │                      │
//! │ Coin1        │ 1p    │ coin1      │ floatCoin1   │                      │
//! └──────────────┴───────┴────────────┴──────────────┴──────────────────────┘
//! ```
//!
//! The float never holds £50 notes: they all go to the bank.
//!
//! Incoming key/count maps are checked against this table. A key outside it
//! is rejected with [`CoreError::UnknownDenomination`] instead of being
//! dropped, and a key that is absent counts as zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Denomination
// =============================================================================

/// A single face value of sterling currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Denomination {
    Note50,
    Note20,
    Note10,
    Note5,
    Coin200,
    Coin100,
    Coin50,
    Coin20,
    Coin10,
    Coin5,
    Coin2,
    Coin1,
}

impl Denomination {
    /// Every denomination, largest first.
    pub const ALL: [Denomination; 12] = [
        Denomination::Note50,
        Denomination::Note20,
        Denomination::Note10,
        Denomination::Note5,
        Denomination::Coin200,
        Denomination::Coin100,
        Denomination::Coin50,
        Denomination::Coin20,
        Denomination::Coin10,
        Denomination::Coin5,
        Denomination::Coin2,
        Denomination::Coin1,
    ];

    /// Denominations that can make up a float, largest first.
    pub const FLOAT: [Denomination; 11] = [
        Denomination::Note20,
        Denomination::Note10,
        Denomination::Note5,
        Denomination::Coin200,
        Denomination::Coin100,
        Denomination::Coin50,
        Denomination::Coin20,
        Denomination::Coin10,
        Denomination::Coin5,
        Denomination::Coin2,
        Denomination::Coin1,
    ];

    /// Face value.
    pub const fn value(self) -> Money {
        let pence = match self {
            Denomination::Note50 => 5000,
            Denomination::Note20 => 2000,
            Denomination::Note10 => 1000,
            Denomination::Note5 => 500,
            Denomination::Coin200 => 200,
            Denomination::Coin100 => 100,
            Denomination::Coin50 => 50,
            Denomination::Coin20 => 20,
            Denomination::Coin10 => 10,
            Denomination::Coin5 => 5,
            Denomination::Coin2 => 2,
            Denomination::Coin1 => 1,
        };
        Money::from_cents(pence)
    }

    /// Key used in the till `denominations` map.
    pub const fn till_key(self) -> &'static str {
        match self {
            Denomination::Note50 => "note50",
            Denomination::Note20 => "note20",
            Denomination::Note10 => "note10",
            Denomination::Note5 => "note5",
            Denomination::Coin200 => "coin200",
            Denomination::Coin100 => "coin100",
            Denomination::Coin50 => "coin50",
            Denomination::Coin20 => "coin20",
            Denomination::Coin10 => "coin10",
            Denomination::Coin5 => "coin5",
            Denomination::Coin2 => "coin2",
            Denomination::Coin1 => "coin1",
        }
    }

    /// Key used in the `floats` map, `None` for the £50 note.
    pub const fn float_key(self) -> Option<&'static str> {
        match self {
            Denomination::Note50 => None,
            Denomination::Note20 => Some("floatNote20"),
            Denomination::Note10 => Some("floatNote10"),
            Denomination::Note5 => Some("floatNote5"),
            Denomination::Coin200 => Some("floatCoin200"),
            Denomination::Coin100 => Some("floatCoin100"),
            Denomination::Coin50 => Some("floatCoin50"),
            Denomination::Coin20 => Some("floatCoin20"),
            Denomination::Coin10 => Some("floatCoin10"),
            Denomination::Coin5 => Some("floatCoin5"),
            Denomination::Coin2 => Some("floatCoin2"),
            Denomination::Coin1 => Some("floatCoin1"),
        }
    }

    /// Human label, e.g. `£20 notes` or `5p coins`.
    pub const fn label(self) -> &'static str {
        match self {
            Denomination::Note50 => "£50 notes",
            Denomination::Note20 => "£20 notes",
            Denomination::Note10 => "£10 notes",
            Denomination::Note5 => "£5 notes",
            Denomination::Coin200 => "£2 coins",
            Denomination::Coin100 => "£1 coins",
            Denomination::Coin50 => "50p coins",
            Denomination::Coin20 => "20p coins",
            Denomination::Coin10 => "10p coins",
            Denomination::Coin5 => "5p coins",
            Denomination::Coin2 => "2p coins",
            Denomination::Coin1 => "1p coins",
        }
    }

    /// Looks up a till key.
    pub fn from_till_key(key: &str) -> Option<Denomination> {
        Denomination::ALL.into_iter().find(|d| d.till_key() == key)
    }

    /// Looks up a float key.
    pub fn from_float_key(key: &str) -> Option<Denomination> {
        Denomination::FLOAT
            .into_iter()
            .find(|d| d.float_key() == Some(key))
    }
}

// =============================================================================
// Till Counts
// =============================================================================

/// Counts of every note and coin in the till.
///
/// Serializes with the till keys (`note50` .. `coin1`); any key missing on
/// input deserializes as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct TillCounts {
    pub note50: i64,
    pub note20: i64,
    pub note10: i64,
    pub note5: i64,
    pub coin200: i64,
    pub coin100: i64,
    pub coin50: i64,
    pub coin20: i64,
    pub coin10: i64,
    pub coin5: i64,
    pub coin2: i64,
    pub coin1: i64,
}

impl TillCounts {
    /// Builds counts from a key → count map.
    ///
    /// ## Rules
    /// - Missing keys count as zero
    /// - Unknown keys fail with `CoreError::UnknownDenomination`
    ///
    /// ## Example
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use till_core::denomination::TillCounts;
    ///
    /// let map = BTreeMap::from([("note20".to_string(), 3)]);
    /// let counts = TillCounts::from_map(&map).unwrap();
    /// assert_eq!(counts.note20, 3);
    /// assert_eq!(counts.coin1, 0);
    /// ```
    pub fn from_map(map: &BTreeMap<String, i64>) -> CoreResult<Self> {
        let mut counts = TillCounts::default();
        for (key, &count) in map {
            let denomination =
                Denomination::from_till_key(key).ok_or_else(|| CoreError::UnknownDenomination {
                    table: "denominations",
                    key: key.clone(),
                })?;
            counts.set(denomination, count);
        }
        Ok(counts)
    }

    /// Count for one denomination.
    pub fn get(&self, denomination: Denomination) -> i64 {
        match denomination {
            Denomination::Note50 => self.note50,
            Denomination::Note20 => self.note20,
            Denomination::Note10 => self.note10,
            Denomination::Note5 => self.note5,
            Denomination::Coin200 => self.coin200,
            Denomination::Coin100 => self.coin100,
            Denomination::Coin50 => self.coin50,
            Denomination::Coin20 => self.coin20,
            Denomination::Coin10 => self.coin10,
            Denomination::Coin5 => self.coin5,
            Denomination::Coin2 => self.coin2,
            Denomination::Coin1 => self.coin1,
        }
    }

    /// Sets the count for one denomination.
    pub fn set(&mut self, denomination: Denomination, count: i64) {
        let slot = match denomination {
            Denomination::Note50 => &mut self.note50,
            Denomination::Note20 => &mut self.note20,
            Denomination::Note10 => &mut self.note10,
            Denomination::Note5 => &mut self.note5,
            Denomination::Coin200 => &mut self.coin200,
            Denomination::Coin100 => &mut self.coin100,
            Denomination::Coin50 => &mut self.coin50,
            Denomination::Coin20 => &mut self.coin20,
            Denomination::Coin10 => &mut self.coin10,
            Denomination::Coin5 => &mut self.coin5,
            Denomination::Coin2 => &mut self.coin2,
            Denomination::Coin1 => &mut self.coin1,
        };
        *slot = count;
    }

    /// `(denomination, count)` pairs, largest first.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, i64)> + '_ {
        Denomination::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Cash value of the counted notes and coins.
    pub fn total(&self) -> Money {
        self.iter()
            .map(|(d, count)| d.value().multiply_quantity(count))
            .sum()
    }
}

// =============================================================================
// Float Counts
// =============================================================================

/// Counts of the notes and coins set aside as tomorrow's float.
///
/// Serializes with the float keys (`floatNote20` .. `floatCoin1`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct FloatCounts {
    pub float_note20: i64,
    pub float_note10: i64,
    pub float_note5: i64,
    pub float_coin200: i64,
    pub float_coin100: i64,
    pub float_coin50: i64,
    pub float_coin20: i64,
    pub float_coin10: i64,
    pub float_coin5: i64,
    pub float_coin2: i64,
    pub float_coin1: i64,
}

impl FloatCounts {
    /// Builds counts from a float key → count map.
    ///
    /// Same rules as [`TillCounts::from_map`]; `floatNote50` is unknown.
    pub fn from_map(map: &BTreeMap<String, i64>) -> CoreResult<Self> {
        let mut counts = FloatCounts::default();
        for (key, &count) in map {
            let denomination =
                Denomination::from_float_key(key).ok_or_else(|| CoreError::UnknownDenomination {
                    table: "floats",
                    key: key.clone(),
                })?;
            counts.set(denomination, count);
        }
        Ok(counts)
    }

    fn slot_mut(&mut self, denomination: Denomination) -> Option<&mut i64> {
        match denomination {
            Denomination::Note50 => None,
            Denomination::Note20 => Some(&mut self.float_note20),
            Denomination::Note10 => Some(&mut self.float_note10),
            Denomination::Note5 => Some(&mut self.float_note5),
            Denomination::Coin200 => Some(&mut self.float_coin200),
            Denomination::Coin100 => Some(&mut self.float_coin100),
            Denomination::Coin50 => Some(&mut self.float_coin50),
            Denomination::Coin20 => Some(&mut self.float_coin20),
            Denomination::Coin10 => Some(&mut self.float_coin10),
            Denomination::Coin5 => Some(&mut self.float_coin5),
            Denomination::Coin2 => Some(&mut self.float_coin2),
            Denomination::Coin1 => Some(&mut self.float_coin1),
        }
    }

    /// Count for one denomination (always 0 for the £50 note).
    pub fn get(&self, denomination: Denomination) -> i64 {
        match denomination {
            Denomination::Note50 => 0,
            Denomination::Note20 => self.float_note20,
            Denomination::Note10 => self.float_note10,
            Denomination::Note5 => self.float_note5,
            Denomination::Coin200 => self.float_coin200,
            Denomination::Coin100 => self.float_coin100,
            Denomination::Coin50 => self.float_coin50,
            Denomination::Coin20 => self.float_coin20,
            Denomination::Coin10 => self.float_coin10,
            Denomination::Coin5 => self.float_coin5,
            Denomination::Coin2 => self.float_coin2,
            Denomination::Coin1 => self.float_coin1,
        }
    }

    /// Sets the count for one denomination. The £50 note has no float slot
    /// and is left untouched.
    pub fn set(&mut self, denomination: Denomination, count: i64) {
        if let Some(slot) = self.slot_mut(denomination) {
            *slot = count;
        }
    }

    /// `(denomination, count)` pairs over the float denominations.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, i64)> + '_ {
        Denomination::FLOAT.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Cash value of the float.
    pub fn total(&self) -> Money {
        self.iter()
            .map(|(d, count)| d.value().multiply_quantity(count))
            .sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_tables_round_trip() {
        for d in Denomination::ALL {
            assert_eq!(Denomination::from_till_key(d.till_key()), Some(d));
        }
        for d in Denomination::FLOAT {
            let key = d.float_key().unwrap();
            assert_eq!(Denomination::from_float_key(key), Some(d));
        }
        assert_eq!(Denomination::Note50.float_key(), None);
        assert_eq!(Denomination::from_float_key("floatNote50"), None);
    }

    #[test]
    fn test_partial_map_defaults_to_zero() {
        let map = BTreeMap::from([("note20".to_string(), 3)]);
        let counts = TillCounts::from_map(&map).unwrap();

        for (d, count) in counts.iter() {
            if d == Denomination::Note20 {
                assert_eq!(count, 3);
            } else {
                assert_eq!(count, 0, "{} should default to zero", d.till_key());
            }
        }
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let map = BTreeMap::from([("note3".to_string(), 1)]);
        let err = TillCounts::from_map(&map).unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnknownDenomination { table: "denominations", ref key } if key == "note3"
        ));

        let map = BTreeMap::from([("floatNote50".to_string(), 1)]);
        assert!(FloatCounts::from_map(&map).is_err());

        // Till keys are not float keys.
        let map = BTreeMap::from([("note20".to_string(), 1)]);
        assert!(FloatCounts::from_map(&map).is_err());
    }

    #[test]
    fn test_totals() {
        let mut till = TillCounts::default();
        till.set(Denomination::Note50, 1);
        till.set(Denomination::Note20, 10);
        till.set(Denomination::Coin100, 50);
        till.set(Denomination::Coin1, 7);
        assert_eq!(till.total(), Money::from_cents(5000 + 20_000 + 5000 + 7));

        let mut float = FloatCounts::default();
        float.set(Denomination::Note20, 10);
        float.set(Denomination::Note50, 4);
        assert_eq!(float.get(Denomination::Note50), 0);
        assert_eq!(float.total(), Money::from_cents(20_000));
    }

    #[test]
    fn test_serde_keys() {
        let mut float = FloatCounts::default();
        float.set(Denomination::Coin200, 8);
        let json = serde_json::to_value(float).unwrap();
        assert_eq!(json["floatCoin200"], 8);
        assert_eq!(json["floatNote20"], 0);
        assert_eq!(json.as_object().unwrap().len(), 11);

        let till: TillCounts = serde_json::from_str(r#"{"coin5": 2}"#).unwrap();
        assert_eq!(till.coin5, 2);
        assert_eq!(till.note50, 0);
    }
}
