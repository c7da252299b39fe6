//! Lookup tables used by the rule resolver
//!
//! Every multiplier table is exact-match only. A key that is not configured
//! resolves to [`MultiplierTable::NEUTRAL`] instead of failing, and the
//! table exposes both the raw [`MultiplierTable::get`] and the defaulting
//! [`MultiplierTable::lookup`] so callers can tell the two apart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Exact-match multiplier table with a neutral fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiplierTable<K: Ord> {
    entries: BTreeMap<K, Decimal>,
}

impl<K: Ord> MultiplierTable<K> {
    /// Value returned for any key that is not configured
    pub const NEUTRAL: Decimal = Decimal::ONE;

    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the configured multiplier, if any
    pub fn get<Q>(&self, key: &Q) -> Option<Decimal>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(key).copied()
    }

    /// Returns the configured multiplier, or [`Self::NEUTRAL`] on a miss
    pub fn lookup<Q>(&self, key: &Q) -> Decimal
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).unwrap_or(Self::NEUTRAL)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Decimal)> {
        self.entries.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &Decimal> {
        self.entries.values()
    }
}

impl<K: Ord + Clone> MultiplierTable<K> {
    /// Copies the table into a plain map (for read-only projections)
    pub fn to_map(&self) -> BTreeMap<K, Decimal> {
        self.entries.clone()
    }
}

impl<K: Ord> Default for MultiplierTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<(K, Decimal)> for MultiplierTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Fixed age brackets used for age-multiplier lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBracket {
    From18To24,
    From25To34,
    From35To49,
    From50To64,
    From65,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 5] = [
        AgeBracket::From18To24,
        AgeBracket::From25To34,
        AgeBracket::From35To49,
        AgeBracket::From50To64,
        AgeBracket::From65,
    ];

    /// Maps an age to its bracket; ages below 18 have none
    pub fn for_age(age: u32) -> Option<Self> {
        match age {
            18..=24 => Some(AgeBracket::From18To24),
            25..=34 => Some(AgeBracket::From25To34),
            35..=49 => Some(AgeBracket::From35To49),
            50..=64 => Some(AgeBracket::From50To64),
            65.. => Some(AgeBracket::From65),
            _ => None,
        }
    }

    /// Key used for this bracket in age-multiplier tables
    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::From18To24 => "18-24",
            AgeBracket::From25To34 => "25-34",
            AgeBracket::From35To49 => "35-49",
            AgeBracket::From50To64 => "50-64",
            AgeBracket::From65 => "65+",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Alternate bracket labels consulted when the exact bracket is not configured
///
/// Maps a standard bracket label to the label of an aggregated bracket,
/// e.g. `"18-24" -> "18-34"`.
pub type BracketFallbacks = BTreeMap<String, String>;

/// Claims-history bucket used by the dynamic claims factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClaimsBucket {
    #[serde(rename = "0")]
    None,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3+")]
    ThreeOrMore,
}

impl ClaimsBucket {
    /// Buckets a claim count; any count of three or more collapses into `3+`
    pub fn for_count(claims: u32) -> Self {
        match claims {
            0 => ClaimsBucket::None,
            1 => ClaimsBucket::One,
            2 => ClaimsBucket::Two,
            _ => ClaimsBucket::ThreeOrMore,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClaimsBucket::None => "0",
            ClaimsBucket::One => "1",
            ClaimsBucket::Two => "2",
            ClaimsBucket::ThreeOrMore => "3+",
        }
    }
}

impl fmt::Display for ClaimsBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Loyalty discount fractions keyed by minimum years of tenure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoyaltySchedule {
    thresholds: BTreeMap<u32, Decimal>,
}

impl LoyaltySchedule {
    /// Returns the highest fraction among all thresholds the tenure meets
    ///
    /// This is a max over every `threshold <= years`, not the nearest
    /// threshold: a larger fraction configured on a lower threshold wins.
    pub fn best_fraction(&self, years: u32) -> Decimal {
        self.thresholds
            .range(..=years)
            .map(|(_, fraction)| *fraction)
            .fold(Decimal::ZERO, Decimal::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &Decimal)> {
        self.thresholds.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

impl FromIterator<(u32, Decimal)> for LoyaltySchedule {
    fn from_iter<I: IntoIterator<Item = (u32, Decimal)>>(iter: I) -> Self {
        Self {
            thresholds: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lookup_miss_is_neutral() {
        let table: MultiplierTable<u64> = [(250_000, dec!(1.0)), (500_000, dec!(1.55))]
            .into_iter()
            .collect();

        assert_eq!(table.lookup(&500_000), dec!(1.55));
        assert_eq!(table.get(&450_000), None);
        assert_eq!(table.lookup(&450_000), Decimal::ONE);
    }

    #[test]
    fn test_string_keys_lookup_by_str() {
        let table: MultiplierTable<String> = [("18-34".to_string(), dec!(1.1))]
            .into_iter()
            .collect();
        assert_eq!(table.get("18-34"), Some(dec!(1.1)));
    }

    #[test]
    fn test_age_brackets() {
        assert_eq!(AgeBracket::for_age(17), None);
        assert_eq!(AgeBracket::for_age(18), Some(AgeBracket::From18To24));
        assert_eq!(AgeBracket::for_age(34), Some(AgeBracket::From25To34));
        assert_eq!(AgeBracket::for_age(35), Some(AgeBracket::From35To49));
        assert_eq!(AgeBracket::for_age(64), Some(AgeBracket::From50To64));
        assert_eq!(AgeBracket::for_age(120), Some(AgeBracket::From65));
    }

    #[test]
    fn test_each_bracket_starts_at_its_label() {
        for bracket in AgeBracket::ALL {
            let lower: u32 = bracket
                .label()
                .trim_end_matches('+')
                .split('-')
                .next()
                .unwrap()
                .parse()
                .unwrap();
            assert_eq!(AgeBracket::for_age(lower), Some(bracket));
        }
    }

    #[test]
    fn test_claims_buckets() {
        assert_eq!(ClaimsBucket::for_count(0), ClaimsBucket::None);
        assert_eq!(ClaimsBucket::for_count(2), ClaimsBucket::Two);
        assert_eq!(ClaimsBucket::for_count(3), ClaimsBucket::ThreeOrMore);
        assert_eq!(ClaimsBucket::for_count(40), ClaimsBucket::ThreeOrMore);
    }

    #[test]
    fn test_loyalty_takes_max_not_nearest() {
        let schedule: LoyaltySchedule = [(1, dec!(0.10)), (5, dec!(0.04))].into_iter().collect();
        assert_eq!(schedule.best_fraction(6), dec!(0.10));
        assert_eq!(schedule.best_fraction(0), Decimal::ZERO);
    }
}
