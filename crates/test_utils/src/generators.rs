//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating quote requests, both inside
//! and outside the accepted field ranges.

use chrono::{DateTime, TimeZone, Utc};
use domain_pricing::{PolicyType, QuoteRequest};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating supported policy types
pub fn policy_type_strategy() -> impl Strategy<Value = PolicyType> {
    prop_oneof![
        Just(PolicyType::Auto),
        Just(PolicyType::Home),
        Just(PolicyType::Life),
    ]
}

/// Strategy for coverage amounts, mixing configured tiers with arbitrary values
pub fn coverage_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![
        prop::sample::select(vec![
            250_000i64, 300_000, 400_000, 500_000, 650_000, 750_000, 1_000_000, 1_200_000,
        ]),
        1i64..5_000_000i64,
    ]
}

/// Strategy for valid customer ages (18 to 120 inclusive)
pub fn valid_age_strategy() -> impl Strategy<Value = i64> {
    18i64..=120i64
}

/// Strategy for valid risk scores (1 to 5 inclusive)
pub fn valid_risk_score_strategy() -> impl Strategy<Value = i64> {
    1i64..=5i64
}

/// Strategy for generating requests that pass validation
pub fn valid_quote_request_strategy() -> impl Strategy<Value = QuoteRequest> {
    (
        policy_type_strategy(),
        coverage_strategy(),
        valid_age_strategy(),
        valid_risk_score_strategy(),
        any::<bool>(),
        0u32..20u32,
        any::<bool>(),
        0u32..6u32,
    )
        .prop_map(
            |(policy_type, coverage, age, risk, multi_policy, loyalty, paperless, claims)| QuoteRequest {
                policy_type: policy_type.to_string(),
                coverage_amount: coverage,
                customer_age: age,
                risk_score: risk,
                customer_id: None,
                multi_policy,
                loyalty_years: loyalty,
                paperless_bill: paperless,
                claims_history: claims,
            },
        )
}

/// Strategy for arbitrary requests, valid or not
pub fn any_quote_request_strategy() -> impl Strategy<Value = QuoteRequest> {
    (
        prop_oneof![
            policy_type_strategy().prop_map(|p| p.to_string()),
            "[a-zA-Z]{0,8}",
        ],
        any::<i64>(),
        -10i64..200i64,
        -3i64..10i64,
    )
        .prop_map(|(policy_type, coverage, age, risk)| QuoteRequest {
            policy_type,
            coverage_amount: coverage,
            customer_age: age,
            risk_score: risk,
            ..Default::default()
        })
}

/// Strategy for discount fractions (0.0000 to 1.0000)
pub fn fraction_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10000u32).prop_map(|n| Decimal::new(n as i64, 4))
}

/// Strategy for instants spread across 2020-2030
pub fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (1_577_836_800i64..1_893_456_000i64)
        .prop_map(|secs| Utc.timestamp_opt(secs, 0).single().unwrap_or_else(Utc::now))
}
