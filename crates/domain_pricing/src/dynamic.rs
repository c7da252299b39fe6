//! Dynamic pricing adjustment
//!
//! When dynamic pricing is enabled the adjusted rate is scaled by the product
//! of three independent factors: seasonality for the calendar quarter,
//! a global market-conditions scalar, and the claims-history bucket.

use chrono::{DateTime, Utc};
use core_kernel::Quarter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DynamicPricing;
use crate::error::ConfigurationError;
use crate::tables::ClaimsBucket;
use crate::validation::ValidatedRequest;

/// The factors behind one dynamic multiplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicAdjustment {
    pub quarter: Quarter,
    pub seasonality: Decimal,
    pub market_conditions: Decimal,
    pub claims_bucket: ClaimsBucket,
    pub claims_history: Decimal,
    /// seasonality x market conditions x claims history
    pub multiplier: Decimal,
}

/// Computes the dynamic multiplier for a request as of the given instant
///
/// Does not consult `dynamic.enabled`; callers skip this entirely and use a
/// multiplier of 1.0 when dynamic pricing is off.
///
/// # Errors
///
/// Returns an `Overflow` configuration error if the factor product leaves
/// the decimal range.
pub fn resolve_dynamic_factor(
    request: &ValidatedRequest,
    dynamic: &DynamicPricing,
    as_of: DateTime<Utc>,
) -> Result<DynamicAdjustment, ConfigurationError> {
    let factors = &dynamic.factors;

    let quarter = Quarter::of_instant(as_of);
    let seasonality = factors.seasonality.lookup(&quarter);
    let market_conditions = factors.market_conditions;
    let claims_bucket = ClaimsBucket::for_count(request.claims_history);
    let claims_history = factors.claims_history.lookup(&claims_bucket);

    let multiplier = seasonality
        .checked_mul(market_conditions)
        .and_then(|product| product.checked_mul(claims_history))
        .ok_or_else(|| ConfigurationError::overflow("dynamic multiplier", request.policy_type))?;

    debug!(
        quarter = %quarter,
        claims_history = request.claims_history,
        dynamic_multiplier = %multiplier,
        "Dynamic multiplier calculated"
    );

    Ok(DynamicAdjustment {
        quarter,
        seasonality,
        market_conditions,
        claims_bucket,
        claims_history,
        multiplier,
    })
}
