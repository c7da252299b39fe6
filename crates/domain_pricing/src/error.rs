//! Rating domain errors
//!
//! The engine distinguishes exactly two failure families:
//! - [`ValidationError`]: the caller sent a malformed request (4xx-equivalent)
//! - [`ConfigurationError`]: the active rate configuration is broken (5xx-equivalent)

use std::fmt;
use thiserror::Error;

/// A request field violated its constraint
///
/// Validation fails fast, so each error names exactly one violated rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid policy type: {0} (must be auto, home, or life)")]
    UnsupportedPolicyType(String),

    #[error("coverage amount must be greater than 0, got {0}")]
    NonPositiveCoverage(i64),

    #[error("customer age must be between 18 and 120, got {0}")]
    AgeOutOfRange(i64),

    #[error("risk score must be between 1 and 5, got {0}")]
    RiskScoreOutOfRange(i64),
}

impl ValidationError {
    /// Returns the request field this error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::UnsupportedPolicyType(_) => "policyType",
            ValidationError::NonPositiveCoverage(_) => "coverageAmount",
            ValidationError::AgeOutOfRange(_) => "customerAge",
            ValidationError::RiskScoreOutOfRange(_) => "riskScore",
        }
    }
}

/// Category of a configuration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationErrorKind {
    /// A validated policy type has no base-rate entry
    RateTableMissing,
    /// The configuration source could not be read
    Unreadable,
    /// The configuration source is not valid JSON for the expected shape
    Malformed,
    /// The configuration parsed but violates a content rule
    Invalid,
    /// Configured factors multiply past the decimal range for a request
    Overflow,
}

impl fmt::Display for ConfigurationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigurationErrorKind::RateTableMissing => "rate table missing",
            ConfigurationErrorKind::Unreadable => "configuration unreadable",
            ConfigurationErrorKind::Malformed => "configuration malformed",
            ConfigurationErrorKind::Invalid => "configuration invalid",
            ConfigurationErrorKind::Overflow => "premium overflow",
        };
        f.write_str(label)
    }
}

/// The rate configuration is missing data or could not be loaded
///
/// Operator-caused: never retried by the engine and never the client's fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ConfigurationError {
    pub kind: ConfigurationErrorKind,
    pub message: String,
}

impl ConfigurationError {
    pub fn new(kind: ConfigurationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a missing base-rate table error
    pub fn rate_table_missing(policy_type: impl fmt::Display) -> Self {
        Self::new(
            ConfigurationErrorKind::RateTableMissing,
            format!("no base rate configured for policy type {}", policy_type),
        )
    }

    pub fn unreadable(source: impl fmt::Display, cause: impl fmt::Display) -> Self {
        Self::new(
            ConfigurationErrorKind::Unreadable,
            format!("{}: {}", source, cause),
        )
    }

    pub fn malformed(cause: impl fmt::Display) -> Self {
        Self::new(ConfigurationErrorKind::Malformed, cause.to_string())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ConfigurationErrorKind::Invalid, message)
    }

    /// Creates an overflow error naming the amount that left the decimal range
    pub fn overflow(amount: &str, policy_type: impl fmt::Display) -> Self {
        Self::new(
            ConfigurationErrorKind::Overflow,
            format!("{} for policy type {} exceeds the decimal range", amount, policy_type),
        )
    }
}

/// Errors returned by the rating engine
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl RatingError {
    /// True when the caller can fix the failure by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, RatingError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::UnsupportedPolicyType("boat".to_string());
        assert_eq!(err.to_string(), "invalid policy type: boat (must be auto, home, or life)");
        assert_eq!(err.field(), "policyType");
    }

    #[test]
    fn test_rating_error_classification() {
        let client: RatingError = ValidationError::AgeOutOfRange(17).into();
        assert!(client.is_client_error());

        let server: RatingError = ConfigurationError::rate_table_missing("life").into();
        assert!(!server.is_client_error());
        assert_eq!(
            server.to_string(),
            "Configuration error: rate table missing: no base rate configured for policy type life"
        );
    }

    #[test]
    fn test_overflow_error_message() {
        let err = ConfigurationError::overflow("base premium", "auto");
        assert_eq!(err.kind, ConfigurationErrorKind::Overflow);
        assert_eq!(
            err.to_string(),
            "premium overflow: base premium for policy type auto exceeds the decimal range"
        );
    }
}
