//! Rate configuration
//!
//! A [`RateConfiguration`] is one versioned, immutable set of rating data:
//! base rates and multiplier tables per policy type, the discount schedule,
//! and the dynamic-pricing factors. It is parsed from JSON once, validated,
//! and then only ever read (see [`crate::store`] for how snapshots are
//! shared and replaced).
//!
//! # Format
//!
//! ```json
//! {
//!   "baseRates": {
//!     "auto": {
//!       "base": 800,
//!       "coverage": { "250000": 1.0, "500000": 1.55 },
//!       "ageMultiplier": { "18-24": 1.8, "35-49": 1.0 },
//!       "riskMultiplier": { "1": 0.85, "2": 1.0 }
//!     }
//!   },
//!   "discounts": {
//!     "multiPolicy": 0.10,
//!     "loyaltyYears": { "2": 0.05, "5": 0.12 },
//!     "lowRisk": 0.05,
//!     "paperlessBilling": 0.03
//!   },
//!   "dynamicPricing": {
//!     "enabled": true,
//!     "factors": {
//!       "seasonality": { "Q1": 1.0, "Q2": 0.95 },
//!       "marketConditions": 1.0,
//!       "claimsHistory": { "0": 1.0, "3+": 1.5 }
//!     }
//!   },
//!   "metadata": { "version": "2024.1", "effectiveDate": "2024-01-01" }
//! }
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{Currency, Quarter};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigurationError;
use crate::quote::PolicyType;
use crate::tables::{BracketFallbacks, ClaimsBucket, LoyaltySchedule, MultiplierTable};

/// Base rate and multiplier tables for one policy type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRates {
    /// Base rate before any multiplier
    pub base: Decimal,
    /// Coverage-tier multipliers keyed by exact coverage amount
    #[serde(default)]
    pub coverage: MultiplierTable<u64>,
    /// Age multipliers keyed by bracket label
    #[serde(default, rename = "ageMultiplier")]
    pub age_multipliers: MultiplierTable<String>,
    /// Risk multipliers keyed by risk score
    #[serde(default, rename = "riskMultiplier")]
    pub risk_multipliers: MultiplierTable<u8>,
}

/// Discount fractions applied against the adjusted rate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSchedule {
    #[serde(default)]
    pub multi_policy: Decimal,
    #[serde(default)]
    pub loyalty_years: LoyaltySchedule,
    #[serde(default)]
    pub low_risk: Decimal,
    #[serde(default)]
    pub paperless_billing: Decimal,
}

/// Market, season and claims-history factors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFactors {
    #[serde(default)]
    pub seasonality: MultiplierTable<Quarter>,
    #[serde(default = "neutral_factor")]
    pub market_conditions: Decimal,
    #[serde(default)]
    pub claims_history: MultiplierTable<ClaimsBucket>,
}

impl Default for DynamicFactors {
    fn default() -> Self {
        Self {
            seasonality: MultiplierTable::new(),
            market_conditions: neutral_factor(),
            claims_history: MultiplierTable::new(),
        }
    }
}

/// Dynamic pricing switch and its factor tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicPricing {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub factors: DynamicFactors,
}

/// Informational metadata about a configuration version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateMetadata {
    #[serde(default = "unversioned")]
    pub version: String,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    /// Currency used to label quoted amounts
    #[serde(default)]
    pub currency: Currency,
}

impl Default for RateMetadata {
    fn default() -> Self {
        Self {
            version: unversioned(),
            effective_date: None,
            last_updated: None,
            currency: Currency::default(),
        }
    }
}

/// One immutable snapshot of all rating data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfiguration {
    pub base_rates: BTreeMap<PolicyType, PolicyRates>,
    #[serde(default)]
    pub discounts: DiscountSchedule,
    #[serde(default)]
    pub dynamic_pricing: DynamicPricing,
    /// Per-policy-type alternate age-bracket labels
    #[serde(default = "default_bracket_fallbacks")]
    pub age_bracket_fallbacks: BTreeMap<PolicyType, BracketFallbacks>,
    #[serde(default)]
    pub metadata: RateMetadata,
}

impl RateConfiguration {
    /// Parses and validates a configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let config: RateConfiguration =
            serde_json::from_str(json).map_err(ConfigurationError::malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::unreadable(path.display(), e))?;
        Self::from_json_str(&content)
    }

    /// Checks content rules that the JSON shape alone cannot express
    ///
    /// # Errors
    ///
    /// Returns an `Invalid` configuration error if there are no policy
    /// types, a base rate or multiplier is not positive, a discount fraction
    /// falls outside `[0, 1]`, or a dynamic factor is not positive.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.base_rates.is_empty() {
            return Err(ConfigurationError::invalid("no policy types configured"));
        }

        for (policy_type, rates) in &self.base_rates {
            if rates.base <= Decimal::ZERO {
                return Err(ConfigurationError::invalid(format!(
                    "base rate for {} must be positive, got {}",
                    policy_type, rates.base
                )));
            }
            let multipliers = rates
                .coverage
                .values()
                .chain(rates.age_multipliers.values())
                .chain(rates.risk_multipliers.values());
            ensure_positive(multipliers, &format!("{} multiplier", policy_type))?;
        }

        let discounts = &self.discounts;
        let fractions = [
            ("multiPolicy", discounts.multi_policy),
            ("lowRisk", discounts.low_risk),
            ("paperlessBilling", discounts.paperless_billing),
        ];
        for (name, fraction) in fractions {
            ensure_fraction(fraction, name)?;
        }
        for (years, fraction) in discounts.loyalty_years.iter() {
            ensure_fraction(*fraction, &format!("loyaltyYears[{}]", years))?;
        }

        let factors = &self.dynamic_pricing.factors;
        ensure_positive(
            factors
                .seasonality
                .values()
                .chain(factors.claims_history.values())
                .chain(std::iter::once(&factors.market_conditions)),
            "dynamic factor",
        )?;

        Ok(())
    }

    /// Returns a copy with the dynamic-pricing switch forced on or off
    pub fn with_dynamic_pricing(mut self, enabled: bool) -> Self {
        self.dynamic_pricing.enabled = enabled;
        self
    }

    /// Returns the rate tables for a policy type
    pub fn policy_rates(&self, policy_type: PolicyType) -> Option<&PolicyRates> {
        self.base_rates.get(&policy_type)
    }

    /// Returns the alternate bracket labels declared for a policy type
    pub fn bracket_fallbacks(&self, policy_type: PolicyType) -> Option<&BracketFallbacks> {
        self.age_bracket_fallbacks.get(&policy_type)
    }

    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    pub fn currency(&self) -> Currency {
        self.metadata.currency
    }

    pub fn is_dynamic_pricing_enabled(&self) -> bool {
        self.dynamic_pricing.enabled
    }
}

/// Home policies price the two youngest brackets as a single `18-34` band
pub fn default_bracket_fallbacks() -> BTreeMap<PolicyType, BracketFallbacks> {
    let home = [("18-24", "18-34"), ("25-34", "18-34")]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();
    BTreeMap::from([(PolicyType::Home, home)])
}

fn ensure_fraction(value: Decimal, name: &str) -> Result<(), ConfigurationError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ConfigurationError::invalid(format!(
            "discount {} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

fn ensure_positive<'a>(
    values: impl Iterator<Item = &'a Decimal>,
    name: &str,
) -> Result<(), ConfigurationError> {
    for value in values {
        if *value <= Decimal::ZERO {
            return Err(ConfigurationError::invalid(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

fn neutral_factor() -> Decimal {
    Decimal::ONE
}

fn unversioned() -> String {
    "unversioned".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationErrorKind;
    use rust_decimal_macros::dec;

    const MINIMAL: &str = r#"{
        "baseRates": {
            "auto": { "base": 800, "coverage": { "500000": 1.55 } }
        }
    }"#;

    #[test]
    fn test_minimal_configuration_uses_defaults() {
        let config = RateConfiguration::from_json_str(MINIMAL).unwrap();

        let auto = config.policy_rates(PolicyType::Auto).unwrap();
        assert_eq!(auto.base, dec!(800));
        assert_eq!(auto.coverage.get(&500_000), Some(dec!(1.55)));
        assert!(!config.is_dynamic_pricing_enabled());
        assert_eq!(config.dynamic_pricing.factors.market_conditions, Decimal::ONE);
        assert_eq!(config.version(), "unversioned");
        assert_eq!(config.currency(), Currency::USD);
        assert!(config.bracket_fallbacks(PolicyType::Home).is_some());
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = RateConfiguration::from_json_str("{ not json").unwrap_err();
        assert_eq!(err.kind, ConfigurationErrorKind::Malformed);
    }

    #[test]
    fn test_discount_fraction_above_one_is_invalid() {
        let json = r#"{
            "baseRates": { "life": { "base": 300 } },
            "discounts": { "multiPolicy": 1.5 }
        }"#;
        let err = RateConfiguration::from_json_str(json).unwrap_err();
        assert_eq!(err.kind, ConfigurationErrorKind::Invalid);
    }

    #[test]
    fn test_with_dynamic_pricing_overrides_flag() {
        let config = RateConfiguration::from_json_str(MINIMAL)
            .unwrap()
            .with_dynamic_pricing(true);
        assert!(config.is_dynamic_pricing_enabled());
    }
}
