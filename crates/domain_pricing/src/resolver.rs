//! Rule resolution
//!
//! [`RuleResolver`] answers every lookup the engine needs against a single
//! [`RateConfiguration`] snapshot. It holds no state of its own, so the same
//! snapshot and inputs always resolve to the same values.
//!
//! Only the base rate lookup can fail. Every multiplier lookup degrades to
//! the neutral 1.0 on a miss, including when the policy type has no tables
//! at all; the missing base rate is what reports that condition. The dynamic
//! and discount products fail only when they leave the decimal range.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::config::{PolicyRates, RateConfiguration};
use crate::discount::{resolve_discounts, DiscountBreakdown};
use crate::dynamic::{resolve_dynamic_factor, DynamicAdjustment};
use crate::error::ConfigurationError;
use crate::quote::PolicyType;
use crate::tables::{AgeBracket, MultiplierTable};
use crate::validation::ValidatedRequest;

/// Pure lookups over one rate configuration snapshot
#[derive(Debug, Clone, Copy)]
pub struct RuleResolver<'a> {
    config: &'a RateConfiguration,
}

impl<'a> RuleResolver<'a> {
    pub fn new(config: &'a RateConfiguration) -> Self {
        Self { config }
    }

    fn policy_rates(&self, policy_type: PolicyType) -> Option<&'a PolicyRates> {
        self.config.policy_rates(policy_type)
    }

    /// Returns the base rate for a policy type
    ///
    /// # Errors
    ///
    /// `RateTableMissing` if the configuration has no entry for the policy
    /// type. Requests are validated first, so this indicates an incomplete
    /// configuration rather than a bad request.
    pub fn resolve_base_rate(&self, policy_type: PolicyType) -> Result<Decimal, ConfigurationError> {
        self.policy_rates(policy_type)
            .map(|rates| rates.base)
            .ok_or_else(|| ConfigurationError::rate_table_missing(policy_type))
    }

    /// Exact-match coverage-tier multiplier; unlisted amounts are neutral
    ///
    /// There is no interpolation between tiers: 450000 between the 400000
    /// and 500000 tiers resolves to 1.0.
    pub fn resolve_coverage_multiplier(&self, policy_type: PolicyType, coverage_amount: u64) -> Decimal {
        self.policy_rates(policy_type)
            .map(|rates| rates.coverage.lookup(&coverage_amount))
            .unwrap_or(MultiplierTable::<u64>::NEUTRAL)
    }

    /// Age multiplier via the age's bracket
    ///
    /// Tries the exact bracket label, then the policy type's declared
    /// alternate label, then falls back to 1.0.
    pub fn resolve_age_multiplier(&self, policy_type: PolicyType, age: u32) -> Decimal {
        let neutral = MultiplierTable::<String>::NEUTRAL;
        let (Some(rates), Some(bracket)) = (self.policy_rates(policy_type), AgeBracket::for_age(age))
        else {
            return neutral;
        };

        let table = &rates.age_multipliers;
        if let Some(multiplier) = table.get(bracket.label()) {
            return multiplier;
        }

        self.config
            .bracket_fallbacks(policy_type)
            .and_then(|fallbacks| fallbacks.get(bracket.label()))
            .and_then(|alternate| table.get(alternate.as_str()))
            .unwrap_or(neutral)
    }

    /// Risk multiplier keyed by score; unlisted scores are neutral
    pub fn resolve_risk_multiplier(&self, policy_type: PolicyType, risk_score: u8) -> Decimal {
        self.policy_rates(policy_type)
            .map(|rates| rates.risk_multipliers.lookup(&risk_score))
            .unwrap_or(MultiplierTable::<u8>::NEUTRAL)
    }

    /// Dynamic adjustment for a request, or `None` when dynamic pricing is off
    pub fn resolve_dynamic_factor(
        &self,
        request: &ValidatedRequest,
        as_of: DateTime<Utc>,
    ) -> Result<Option<DynamicAdjustment>, ConfigurationError> {
        let dynamic = &self.config.dynamic_pricing;
        dynamic
            .enabled
            .then(|| resolve_dynamic_factor(request, dynamic, as_of))
            .transpose()
    }

    /// Discount amount against the adjusted rate, with the fractions behind it
    ///
    /// The amount is the flat sum of each qualifying fraction times
    /// `adjusted_rate`; fractions never compound.
    ///
    /// # Errors
    ///
    /// `Overflow` if the discount amount leaves the decimal range.
    pub fn resolve_discount(
        &self,
        request: &ValidatedRequest,
        adjusted_rate: Decimal,
    ) -> Result<(Decimal, DiscountBreakdown), ConfigurationError> {
        let breakdown = resolve_discounts(request, &self.config.discounts);
        let amount = breakdown
            .amount(adjusted_rate)
            .ok_or_else(|| ConfigurationError::overflow("discount amount", request.policy_type))?;
        Ok((amount, breakdown))
    }
}
