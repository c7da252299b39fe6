//! Quote request and quote value objects
//!
//! [`QuoteRequest`] is what a caller sends, with raw, unvalidated fields.
//! [`Quote`] is what the engine returns: rounded premiums plus the full
//! [`Factors`] breakdown used to produce them.

use chrono::{DateTime, Utc};
use core_kernel::{Currency, QuoteId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::discount::DiscountBreakdown;
use crate::error::ValidationError;

/// Supported lines of business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    Auto,
    Home,
    Life,
}

impl PolicyType {
    pub const ALL: [PolicyType; 3] = [PolicyType::Auto, PolicyType::Home, PolicyType::Life];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Auto => "auto",
            PolicyType::Home => "home",
            PolicyType::Life => "life",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(PolicyType::Auto),
            "home" => Ok(PolicyType::Home),
            "life" => Ok(PolicyType::Life),
            other => Err(ValidationError::UnsupportedPolicyType(other.to_string())),
        }
    }
}

/// A request for a premium quote, as supplied by the caller
///
/// Numeric fields are wide signed integers: out-of-range input reaches the
/// validator instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub policy_type: String,
    pub coverage_amount: i64,
    pub customer_age: i64,
    pub risk_score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub multi_policy: bool,
    #[serde(default)]
    pub loyalty_years: u32,
    #[serde(default)]
    pub paperless_bill: bool,
    #[serde(default)]
    pub claims_history: u32,
}

/// Intermediate multipliers behind a quote, kept for audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Factors {
    /// The policy type's base rate
    pub base_multiplier: Decimal,
    pub coverage_multiplier: Decimal,
    pub age_multiplier: Decimal,
    pub risk_multiplier: Decimal,
    /// 1.0 whenever dynamic pricing is disabled
    pub dynamic_multiplier: Decimal,
    pub discount_amount: Decimal,
    /// Fractions that made up the discount
    pub discounts: DiscountBreakdown,
}

/// A priced quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub quote_id: QuoteId,
    pub policy_type: PolicyType,
    pub coverage_amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub currency: Currency,
    pub base_premium: Decimal,
    pub adjusted_rate: Decimal,
    pub discount_amount: Decimal,
    pub final_premium: Decimal,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    /// Version of the rate configuration the quote was priced with
    pub rate_version: String,
    pub factors: Factors,
}

impl Quote {
    /// True if the quote can still be honoured at the given instant
    pub fn is_valid_at(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.created_at && instant < self.valid_until
    }
}

/// Base rate and coverage tiers for one policy type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSummary {
    pub policy_type: PolicyType,
    pub base_rate: Decimal,
    pub coverage: BTreeMap<u64, Decimal>,
}

/// Read-only projection of the active rate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesSnapshot {
    pub rates: Vec<RateSummary>,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_type_parsing_is_exact() {
        assert_eq!("home".parse::<PolicyType>().unwrap(), PolicyType::Home);
        assert_eq!(
            "Home".parse::<PolicyType>(),
            Err(ValidationError::UnsupportedPolicyType("Home".to_string()))
        );
    }

    #[test]
    fn test_request_optional_fields_default() {
        let json = r#"{"policyType":"auto","coverageAmount":500000,"customerAge":35,"riskScore":2}"#;
        let request: QuoteRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.customer_id, None);
        assert!(!request.multi_policy);
        assert_eq!(request.loyalty_years, 0);
        assert!(!request.paperless_bill);
        assert_eq!(request.claims_history, 0);
    }
}
