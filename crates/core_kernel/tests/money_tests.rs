//! Unit tests for the Money module
//!
//! Covers the rounding policy applied to emitted premiums, currency
//! handling, and arithmetic on unrounded intermediate values.

use core_kernel::{Money, Currency, MoneyError};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_does_not_round() {
        let m = Money::new(dec!(200.8790), Currency::USD);
        assert_eq!(m.amount(), dec!(200.8790));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::EUR);
    }

    #[test]
    fn test_default_currency_is_usd() {
        assert_eq!(Currency::default(), Currency::USD);
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_rounds_to_two_places_for_usd() {
        let m = Money::new(dec!(977.1234), Currency::USD).rounded();
        assert_eq!(m.amount(), dec!(977.12));
    }

    #[test]
    fn test_midpoint_rounds_up() {
        assert_eq!(Money::new(dec!(0.125), Currency::USD).rounded().amount(), dec!(0.13));
        assert_eq!(Money::new(dec!(0.135), Currency::USD).rounded().amount(), dec!(0.14));
    }

    #[test]
    fn test_negative_midpoint_rounds_away_from_zero() {
        assert_eq!(Money::new(dec!(-0.125), Currency::USD).rounded().amount(), dec!(-0.13));
    }

    #[test]
    fn test_rounded_amount_has_fixed_scale() {
        assert_eq!(Money::new(dec!(800), Currency::USD).rounded().amount().to_string(), "800.00");
        assert_eq!(Money::new(dec!(1500.4), Currency::JPY).rounded().amount().to_string(), "1500");
    }

    #[test]
    fn test_display_uses_rounded_amount() {
        let m = Money::new(dec!(1178.0049), Currency::USD);
        assert_eq!(m.to_string(), "$ 1178.00");
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_subtraction_can_go_negative() {
        let adjusted = Money::new(dec!(100), Currency::USD);
        let discount = Money::new(dec!(120), Currency::USD);

        let result = adjusted.checked_sub(&discount).unwrap();
        assert!(result.is_negative());
        assert_eq!(result.amount(), dec!(-20));
    }

    #[test]
    fn test_multiply_by_factor() {
        let m = Money::new(dec!(1240), Currency::USD) * dec!(0.95);
        assert_eq!(m.amount(), dec!(1178.00));
    }

    #[test]
    fn test_mismatched_currencies_are_rejected() {
        let usd = Money::new(dec!(1), Currency::USD);
        let gbp = Money::new(dec!(1), Currency::GBP);
        assert_eq!(
            usd.checked_add(&gbp),
            Err(MoneyError::CurrencyMismatch("USD".to_string(), "GBP".to_string()))
        );
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_operator_add_panics_on_mismatch() {
        let _ = Money::new(dec!(1), Currency::USD) + Money::new(dec!(1), Currency::EUR);
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_currency_serializes_as_code() {
        let json = serde_json::to_string(&Currency::CHF).unwrap();
        assert_eq!(json, "\"CHF\"");
    }
}
