//! Quote request validation
//!
//! Validation is pure and total: no I/O, no partial state, and the first
//! violated rule is reported. Rules are checked in field order (policy type,
//! coverage amount, customer age, risk score).

use crate::error::ValidationError;
use crate::quote::{PolicyType, QuoteRequest};

/// A request whose fields are known to satisfy every constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub policy_type: PolicyType,
    pub coverage_amount: u64,
    pub customer_age: u32,
    pub risk_score: u8,
    pub customer_id: Option<String>,
    pub multi_policy: bool,
    pub loyalty_years: u32,
    pub paperless_bill: bool,
    pub claims_history: u32,
}

/// Validates quote requests before any rate lookup happens
pub struct QuoteValidator;

impl QuoteValidator {
    pub const MIN_AGE: i64 = 18;
    pub const MAX_AGE: i64 = 120;
    pub const MIN_RISK_SCORE: i64 = 1;
    pub const MAX_RISK_SCORE: i64 = 5;

    /// Validates a request and converts it into its typed form
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first violated rule.
    pub fn validate(request: &QuoteRequest) -> Result<ValidatedRequest, ValidationError> {
        let policy_type: PolicyType = request.policy_type.parse()?;

        let coverage_amount = u64::try_from(request.coverage_amount)
            .ok()
            .filter(|amount| *amount > 0)
            .ok_or(ValidationError::NonPositiveCoverage(request.coverage_amount))?;

        if !(Self::MIN_AGE..=Self::MAX_AGE).contains(&request.customer_age) {
            return Err(ValidationError::AgeOutOfRange(request.customer_age));
        }

        if !(Self::MIN_RISK_SCORE..=Self::MAX_RISK_SCORE).contains(&request.risk_score) {
            return Err(ValidationError::RiskScoreOutOfRange(request.risk_score));
        }

        Ok(ValidatedRequest {
            policy_type,
            coverage_amount,
            // Range checks above make both narrowing casts lossless
            customer_age: request.customer_age as u32,
            risk_score: request.risk_score as u8,
            customer_id: request.customer_id.clone(),
            multi_policy: request.multi_policy,
            loyalty_years: request.loyalty_years,
            paperless_bill: request.paperless_bill,
            claims_history: request.claims_history,
        })
    }

    /// Returns true if the request passes every rule
    pub fn is_valid(request: &QuoteRequest) -> bool {
        Self::validate(request).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> QuoteRequest {
        QuoteRequest {
            policy_type: "auto".to_string(),
            coverage_amount: 500_000,
            customer_age: 35,
            risk_score: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_request() {
        let validated = QuoteValidator::validate(&request()).unwrap();
        assert_eq!(validated.policy_type, PolicyType::Auto);
        assert_eq!(validated.coverage_amount, 500_000);
    }

    #[test]
    fn test_first_violation_wins() {
        let bad = QuoteRequest {
            policy_type: "boat".to_string(),
            coverage_amount: 0,
            customer_age: 10,
            risk_score: 9,
            ..Default::default()
        };
        assert_eq!(
            QuoteValidator::validate(&bad),
            Err(ValidationError::UnsupportedPolicyType("boat".to_string()))
        );
    }

    #[test]
    fn test_negative_coverage_rejected() {
        let bad = QuoteRequest {
            coverage_amount: -5,
            ..request()
        };
        assert_eq!(
            QuoteValidator::validate(&bad),
            Err(ValidationError::NonPositiveCoverage(-5))
        );
    }
}
