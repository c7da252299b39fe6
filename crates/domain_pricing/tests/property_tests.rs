//! Property-based tests for the rating engine

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_pricing::{LoyaltySchedule, QuoteValidator, RatingError, RuleResolver};
use test_utils::{
    any_quote_request_strategy, assert_decimal_approx_eq, assert_factors_populated,
    fraction_strategy, instant_strategy, policy_type_strategy, valid_quote_request_strategy,
    EngineFixtures, RateFixtures,
};

proptest! {
    #[test]
    fn prop_valid_requests_always_quote(request in valid_quote_request_strategy(), as_of in instant_strategy()) {
        let engine = EngineFixtures::at(RateFixtures::reference(), as_of);
        let quote = engine.calculate_quote(&request).unwrap();
        assert_factors_populated(&quote);
    }

    #[test]
    fn prop_quotes_are_idempotent(request in valid_quote_request_strategy(), as_of in instant_strategy()) {
        let engine = EngineFixtures::at(RateFixtures::reference(), as_of);
        let first = engine.calculate_quote(&request).unwrap();
        let second = engine.calculate_quote(&request).unwrap();

        prop_assert_eq!(first.base_premium, second.base_premium);
        prop_assert_eq!(first.adjusted_rate, second.adjusted_rate);
        prop_assert_eq!(first.discount_amount, second.discount_amount);
        prop_assert_eq!(first.final_premium, second.final_premium);
        prop_assert_eq!(first.factors, second.factors);
    }

    #[test]
    fn prop_discount_is_flat_sum_of_fractions(request in valid_quote_request_strategy()) {
        let config = RateFixtures::reference();
        let resolver = RuleResolver::new(&config);
        let validated = QuoteValidator::validate(&request).unwrap();
        let adjusted_rate = Decimal::new(123_456, 2);

        let (amount, breakdown) = resolver.resolve_discount(&validated, adjusted_rate).unwrap();

        assert_decimal_approx_eq(amount, adjusted_rate * breakdown.total_fraction(), Decimal::new(1, 20));
    }

    #[test]
    fn prop_final_premium_is_adjusted_minus_discount(request in valid_quote_request_strategy(), as_of in instant_strategy()) {
        let engine = EngineFixtures::at(RateFixtures::reference(), as_of);
        let quote = engine.calculate_quote(&request).unwrap();

        assert_decimal_approx_eq(
            quote.final_premium,
            quote.adjusted_rate - quote.discount_amount,
            Decimal::new(1, 2),
        );
    }

    #[test]
    fn prop_loyalty_takes_max_of_met_thresholds(
        thresholds in prop::collection::btree_map(0u32..30u32, fraction_strategy(), 0..8),
        years in 0u32..40u32,
    ) {
        let schedule: LoyaltySchedule = thresholds.clone().into_iter().collect();

        let expected = thresholds
            .iter()
            .filter(|(threshold, _)| **threshold <= years)
            .map(|(_, fraction)| *fraction)
            .max()
            .unwrap_or(Decimal::ZERO);

        prop_assert_eq!(schedule.best_fraction(years), expected);
    }

    #[test]
    fn prop_validation_is_total(request in any_quote_request_strategy()) {
        let engine = EngineFixtures::at(RateFixtures::reference(), test_utils::TemporalFixtures::q1());
        match engine.calculate_quote(&request) {
            Ok(_) => prop_assert!(QuoteValidator::is_valid(&request)),
            Err(RatingError::Validation(_)) => prop_assert!(!QuoteValidator::is_valid(&request)),
            Err(RatingError::Configuration(err)) => {
                prop_assert!(false, "reference configuration must cover every policy type: {}", err)
            }
        }
    }

    #[test]
    fn prop_dynamic_disabled_never_adjusts(request in valid_quote_request_strategy(), as_of in instant_strategy()) {
        let engine = EngineFixtures::at(RateFixtures::without_dynamic_pricing(), as_of);
        let quote = engine.calculate_quote(&request).unwrap();

        prop_assert_eq!(quote.factors.dynamic_multiplier, Decimal::ONE);
        prop_assert_eq!(quote.adjusted_rate, quote.base_premium);
    }

    #[test]
    fn prop_off_tier_coverage_is_neutral(policy_type in policy_type_strategy(), coverage in 1u64..5_000_000u64) {
        let config = RateFixtures::reference();
        let resolver = RuleResolver::new(&config);
        let rates = config.policy_rates(policy_type).unwrap();

        prop_assume!(!rates.coverage.contains(&coverage));
        prop_assert_eq!(resolver.resolve_coverage_multiplier(policy_type, coverage), Decimal::ONE);
    }
}
