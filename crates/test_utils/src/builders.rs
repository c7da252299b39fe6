//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use domain_pricing::{PolicyType, QuoteRequest, RateConfiguration};
use rust_decimal::Decimal;

use crate::fixtures::RateFixtures;

/// Builder for quote requests
///
/// Defaults to the documented auto example: 500000 coverage, age 35,
/// risk score 2, no discounts, no claims.
pub struct QuoteRequestBuilder {
    request: QuoteRequest,
}

impl Default for QuoteRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteRequestBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            request: QuoteRequest {
                policy_type: PolicyType::Auto.to_string(),
                coverage_amount: 500_000,
                customer_age: 35,
                risk_score: 2,
                ..Default::default()
            },
        }
    }

    /// Starts from the defaults for another policy type
    pub fn for_policy(policy_type: PolicyType) -> Self {
        Self::new().with_policy_type(policy_type.as_str())
    }

    /// Sets the policy type (unchecked, so invalid values can be tested)
    pub fn with_policy_type(mut self, policy_type: impl Into<String>) -> Self {
        self.request.policy_type = policy_type.into();
        self
    }

    pub fn with_coverage(mut self, coverage_amount: i64) -> Self {
        self.request.coverage_amount = coverage_amount;
        self
    }

    pub fn with_age(mut self, customer_age: i64) -> Self {
        self.request.customer_age = customer_age;
        self
    }

    pub fn with_risk_score(mut self, risk_score: i64) -> Self {
        self.request.risk_score = risk_score;
        self
    }

    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.request.customer_id = Some(customer_id.into());
        self
    }

    pub fn multi_policy(mut self) -> Self {
        self.request.multi_policy = true;
        self
    }

    pub fn with_loyalty_years(mut self, years: u32) -> Self {
        self.request.loyalty_years = years;
        self
    }

    pub fn paperless(mut self) -> Self {
        self.request.paperless_bill = true;
        self
    }

    pub fn with_claims(mut self, claims: u32) -> Self {
        self.request.claims_history = claims;
        self
    }

    /// Builds the request
    pub fn build(self) -> QuoteRequest {
        self.request
    }
}

/// Builder for variations on the reference rate configuration
pub struct RateConfigurationBuilder {
    config: RateConfiguration,
}

impl Default for RateConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RateConfigurationBuilder {
    /// Starts from the reference configuration
    pub fn new() -> Self {
        Self {
            config: RateFixtures::reference(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.config.metadata.version = version.into();
        self
    }

    pub fn with_dynamic_pricing(mut self, enabled: bool) -> Self {
        self.config.dynamic_pricing.enabled = enabled;
        self
    }

    pub fn with_market_conditions(mut self, factor: Decimal) -> Self {
        self.config.dynamic_pricing.factors.market_conditions = factor;
        self
    }

    pub fn with_multi_policy_discount(mut self, fraction: Decimal) -> Self {
        self.config.discounts.multi_policy = fraction;
        self
    }

    pub fn with_loyalty_schedule(mut self, thresholds: impl IntoIterator<Item = (u32, Decimal)>) -> Self {
        self.config.discounts.loyalty_years = thresholds.into_iter().collect();
        self
    }

    /// Drops a policy type's tables entirely
    pub fn without_policy_type(mut self, policy_type: PolicyType) -> Self {
        self.config.base_rates.remove(&policy_type);
        self
    }

    /// Builds the configuration without re-validating it
    pub fn build(self) -> RateConfiguration {
        self.config
    }
}
