//! Discount stacking
//!
//! Discounts are independent fractions of the adjusted rate. They are summed,
//! never compounded, and the sum is not capped: a schedule whose applicable
//! fractions exceed 1.0 produces a discount larger than the adjusted rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DiscountSchedule;
use crate::validation::ValidatedRequest;

/// Risk score that qualifies for the low-risk discount
pub const LOW_RISK_SCORE: u8 = 1;

/// Discount fractions that apply to one request
///
/// A fraction is zero when its condition does not hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountBreakdown {
    pub multi_policy: Decimal,
    pub loyalty: Decimal,
    pub low_risk: Decimal,
    pub paperless: Decimal,
}

impl DiscountBreakdown {
    /// Sum of all applicable fractions
    pub fn total_fraction(&self) -> Decimal {
        self.multi_policy + self.loyalty + self.low_risk + self.paperless
    }

    /// Discount amount against an adjusted rate, one term per fraction
    ///
    /// `None` if the sum leaves the decimal range.
    pub fn amount(&self, adjusted_rate: Decimal) -> Option<Decimal> {
        [self.multi_policy, self.loyalty, self.low_risk, self.paperless]
            .into_iter()
            .try_fold(Decimal::ZERO, |total, fraction| {
                total.checked_add(adjusted_rate.checked_mul(fraction)?)
            })
    }
}

/// Selects the discount fractions a request qualifies for
pub fn resolve_discounts(request: &ValidatedRequest, schedule: &DiscountSchedule) -> DiscountBreakdown {
    let breakdown = DiscountBreakdown {
        multi_policy: if request.multi_policy {
            schedule.multi_policy
        } else {
            Decimal::ZERO
        },
        loyalty: if request.loyalty_years > 0 {
            schedule.loyalty_years.best_fraction(request.loyalty_years)
        } else {
            Decimal::ZERO
        },
        low_risk: if request.risk_score == LOW_RISK_SCORE {
            schedule.low_risk
        } else {
            Decimal::ZERO
        },
        paperless: if request.paperless_bill {
            schedule.paperless_billing
        } else {
            Decimal::ZERO
        },
    };

    debug!(
        multi_policy = request.multi_policy,
        loyalty_years = request.loyalty_years,
        paperless_bill = request.paperless_bill,
        risk_score = request.risk_score,
        total_fraction = %breakdown.total_fraction(),
        "Discount fractions resolved"
    );

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::PolicyType;
    use rust_decimal_macros::dec;

    fn schedule() -> DiscountSchedule {
        DiscountSchedule {
            multi_policy: dec!(0.10),
            loyalty_years: [(2, dec!(0.05)), (5, dec!(0.12))].into_iter().collect(),
            low_risk: dec!(0.05),
            paperless_billing: dec!(0.03),
        }
    }

    fn request() -> ValidatedRequest {
        ValidatedRequest {
            policy_type: PolicyType::Auto,
            coverage_amount: 500_000,
            customer_age: 35,
            risk_score: 2,
            customer_id: None,
            multi_policy: false,
            loyalty_years: 0,
            paperless_bill: false,
            claims_history: 0,
        }
    }

    #[test]
    fn test_no_qualifying_conditions() {
        let breakdown = resolve_discounts(&request(), &schedule());
        assert_eq!(breakdown, DiscountBreakdown::default());
        assert_eq!(breakdown.amount(dec!(1000)), Some(Decimal::ZERO));
    }

    #[test]
    fn test_all_discounts_stack_additively() {
        let request = ValidatedRequest {
            multi_policy: true,
            loyalty_years: 5,
            paperless_bill: true,
            risk_score: 1,
            ..request()
        };
        let breakdown = resolve_discounts(&request, &schedule());

        assert_eq!(breakdown.total_fraction(), dec!(0.30));
        assert_eq!(breakdown.amount(dec!(1000)), Some(dec!(300)));
    }

    #[test]
    fn test_amount_past_decimal_range_is_none() {
        let breakdown = DiscountBreakdown {
            multi_policy: dec!(0.9),
            loyalty: dec!(0.9),
            ..DiscountBreakdown::default()
        };
        assert_eq!(breakdown.amount(Decimal::MAX), None);
    }
}
