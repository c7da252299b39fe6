//! Pre-built Test Fixtures
//!
//! Provides the reference rate configuration and fixed instants used across
//! the rating engine test suite. Values are chosen to match the documented
//! worked example (auto, 500000 coverage, age 35, risk 2).

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::FixedClock;
use domain_pricing::{RateConfiguration, RatingEngine};

/// Reference rate configuration document
pub const REFERENCE_RATES_JSON: &str = include_str!("../../../data/pricing-rules.json");

/// Fixture for rate configurations
pub struct RateFixtures;

impl RateFixtures {
    /// The reference configuration with dynamic pricing enabled
    pub fn reference() -> RateConfiguration {
        RateConfiguration::from_json_str(REFERENCE_RATES_JSON)
            .expect("reference rate configuration must be valid")
    }

    /// The reference configuration with dynamic pricing switched off
    pub fn without_dynamic_pricing() -> RateConfiguration {
        Self::reference().with_dynamic_pricing(false)
    }

    /// The reference configuration relabelled with a different version
    pub fn with_version(version: &str) -> RateConfiguration {
        let mut config = Self::reference();
        config.metadata.version = version.to_string();
        config
    }
}

/// Fixture for pricing instants, one per seasonality quarter
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Mid-February: Q1, seasonality 1.0
    pub fn q1() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap()
    }

    /// Mid-May: Q2, seasonality 0.95
    pub fn q2() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    /// Mid-August: Q3, seasonality 1.0
    pub fn q3() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 15, 12, 0, 0).unwrap()
    }

    /// Mid-November: Q4, seasonality 1.05
    pub fn q4() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 15, 12, 0, 0).unwrap()
    }
}

/// Fixture for ready-to-use engines
pub struct EngineFixtures;

impl EngineFixtures {
    /// Engine over the reference configuration with its clock pinned to Q2
    pub fn reference_in_q2() -> RatingEngine {
        Self::at(RateFixtures::reference(), TemporalFixtures::q2())
    }

    /// Engine over `config` with its clock pinned to `now`
    pub fn at(config: RateConfiguration, now: DateTime<Utc>) -> RatingEngine {
        RatingEngine::from_configuration(config).with_clock(Arc::new(FixedClock(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_pricing::PolicyType;

    #[test]
    fn test_reference_configuration_covers_every_policy_type() {
        let config = RateFixtures::reference();
        for policy_type in PolicyType::ALL {
            assert!(config.policy_rates(policy_type).is_some());
        }
        assert!(config.is_dynamic_pricing_enabled());
        assert!(!RateFixtures::without_dynamic_pricing().is_dynamic_pricing_enabled());
    }
}
