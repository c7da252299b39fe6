//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for quotes and decimal amounts that
//! give more meaningful error messages than standard assertions.

use domain_pricing::Quote;
use rust_decimal::Decimal;

/// Asserts that two decimals are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the values differ by more than `tolerance`
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Decimals differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that every multiplier in a quote's factors is positive and that
/// the breakdown agrees with the top-level amounts
pub fn assert_factors_populated(quote: &Quote) {
    let factors = &quote.factors;
    let multipliers = [
        ("baseMultiplier", factors.base_multiplier),
        ("coverageMultiplier", factors.coverage_multiplier),
        ("ageMultiplier", factors.age_multiplier),
        ("riskMultiplier", factors.risk_multiplier),
        ("dynamicMultiplier", factors.dynamic_multiplier),
    ];
    for (name, value) in multipliers {
        assert!(
            value > Decimal::ZERO,
            "Expected {} to be positive, got {}",
            name,
            value
        );
    }
    assert_eq!(
        factors.discount_amount, quote.discount_amount,
        "Factors discount {} does not match quote discount {}",
        factors.discount_amount, quote.discount_amount
    );
}

/// Asserts that the quote amounts satisfy the rating pipeline identities,
/// within one minor unit of rounding
pub fn assert_quote_consistent(quote: &Quote) {
    let cent = Decimal::new(1, quote.currency.decimal_places());
    let f = &quote.factors;

    let base = f.base_multiplier * f.coverage_multiplier * f.age_multiplier * f.risk_multiplier;
    assert_decimal_approx_eq(quote.base_premium, base, cent);
    assert_decimal_approx_eq(quote.adjusted_rate, base * f.dynamic_multiplier, cent);
    assert_decimal_approx_eq(
        quote.discount_amount,
        base * f.dynamic_multiplier * f.discounts.total_fraction(),
        cent,
    );
}

/// Asserts that the final premium is not negative
pub fn assert_premium_non_negative(quote: &Quote) {
    assert!(
        quote.final_premium >= Decimal::ZERO,
        "Expected non-negative final premium, got {}",
        quote.final_premium
    );
}
