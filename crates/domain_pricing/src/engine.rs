//! Quote calculation
//!
//! [`RatingEngine`] validates a request, takes one configuration snapshot,
//! resolves every factor against it and produces a [`Quote`]:
//!
//! ```text
//! basePremium   = baseRate x coverage x age x risk
//! adjustedRate  = basePremium x dynamicMultiplier   (1.0 when disabled)
//! discount      = sum(fraction_i x adjustedRate)
//! finalPremium  = adjustedRate - discount
//! ```
//!
//! All arithmetic is carried out at full decimal precision. Amounts are
//! rounded to the currency's minor units once, when the quote is emitted.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use core_kernel::{Clock, Currency, Money, QuoteId, SystemClock};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::RateConfiguration;
use crate::dynamic::DynamicAdjustment;
use crate::error::{ConfigurationError, RatingError};
use crate::quote::{Factors, PolicyType, Quote, QuoteRequest, RateSummary, RatesSnapshot};
use crate::resolver::RuleResolver;
use crate::store::RateConfigurationStore;
use crate::validation::{QuoteValidator, ValidatedRequest};

/// How long a quote stays valid after it is created
pub const QUOTE_VALIDITY_DAYS: i64 = 30;

/// What to do when stacked discounts exceed the adjusted rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PremiumFloor {
    /// Report the arithmetic result, even if negative
    #[default]
    #[serde(rename = "none")]
    Unclamped,
    /// Never quote below zero
    Zero,
}

impl PremiumFloor {
    pub fn apply(&self, premium: Money) -> Money {
        match self {
            PremiumFloor::Unclamped => premium,
            PremiumFloor::Zero => premium.floor_at_zero(),
        }
    }
}

/// Unrounded result of rating one request against one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub request: ValidatedRequest,
    pub factors: Factors,
    /// Present only when dynamic pricing was applied
    pub dynamic: Option<DynamicAdjustment>,
    pub base_premium: Money,
    pub adjusted_rate: Money,
    pub discount_amount: Money,
    pub final_premium: Money,
    /// True when the premium floor changed the final premium
    pub floor_applied: bool,
    pub rate_version: String,
}

impl Rating {
    /// Rounds every amount and stamps identity and validity
    pub fn into_quote(self, created_at: DateTime<Utc>) -> Quote {
        let currency = self.final_premium.currency();
        let mut factors = self.factors;
        factors.discount_amount = currency.round(factors.discount_amount);

        Quote {
            quote_id: QuoteId::new(),
            policy_type: self.request.policy_type,
            coverage_amount: self.request.coverage_amount,
            customer_id: self.request.customer_id,
            currency,
            base_premium: self.base_premium.rounded().amount(),
            adjusted_rate: self.adjusted_rate.rounded().amount(),
            discount_amount: self.discount_amount.rounded().amount(),
            final_premium: self.final_premium.rounded().amount(),
            created_at,
            valid_until: created_at + Duration::days(QUOTE_VALIDITY_DAYS),
            rate_version: self.rate_version,
            factors,
        }
    }
}

/// Prices quote requests against the active rate configuration
///
/// Cheap to share: wrap in an `Arc` and call from any number of threads.
pub struct RatingEngine {
    store: Arc<RateConfigurationStore>,
    clock: Arc<dyn Clock>,
    premium_floor: PremiumFloor,
}

impl RatingEngine {
    /// Creates an engine reading snapshots from `store` and time from the system clock
    pub fn new(store: Arc<RateConfigurationStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            premium_floor: PremiumFloor::default(),
        }
    }

    /// Creates an engine over a fixed configuration
    pub fn from_configuration(config: RateConfiguration) -> Self {
        Self::new(Arc::new(RateConfigurationStore::new(config)))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_premium_floor(mut self, premium_floor: PremiumFloor) -> Self {
        self.premium_floor = premium_floor;
        self
    }

    pub fn store(&self) -> &Arc<RateConfigurationStore> {
        &self.store
    }

    /// Calculates a quote as of the engine clock's current time
    ///
    /// # Errors
    ///
    /// * `RatingError::Validation` - the request violates a field constraint
    /// * `RatingError::Configuration` - the snapshot has no base rate for the
    ///   requested policy type, or its factors overflow for this request
    pub fn calculate_quote(&self, request: &QuoteRequest) -> Result<Quote, RatingError> {
        self.calculate_quote_at(request, self.clock.now())
    }

    /// Calculates a quote as of an explicit instant
    ///
    /// `as_of` selects the seasonality quarter and becomes the quote's
    /// creation time.
    ///
    /// # Arguments
    ///
    /// * `request` - The caller's quote request
    /// * `as_of` - The pricing instant
    ///
    /// # Returns
    ///
    /// A quote with rounded amounts, valid for [`QUOTE_VALIDITY_DAYS`]
    #[instrument(skip(self, request), fields(policy_type = %request.policy_type))]
    pub fn calculate_quote_at(
        &self,
        request: &QuoteRequest,
        as_of: DateTime<Utc>,
    ) -> Result<Quote, RatingError> {
        let validated = QuoteValidator::validate(request)?;
        let snapshot = self.store.snapshot();
        let rating = self.rate(&snapshot, validated, as_of)?;

        let dynamic_applied = rating.dynamic.is_some();
        let quote = rating.into_quote(as_of);

        info!(
            quote_id = %quote.quote_id,
            policy_type = %quote.policy_type,
            coverage_amount = quote.coverage_amount,
            final_premium = %quote.final_premium,
            dynamic_pricing = dynamic_applied,
            rate_version = %quote.rate_version,
            "Quote calculated"
        );

        Ok(quote)
    }

    /// Rates a validated request against one snapshot, without rounding
    ///
    /// # Errors
    ///
    /// Returns `RatingError::Configuration` if the policy type has no base rate
    /// or a premium amount leaves the decimal range.
    pub fn rate(
        &self,
        config: &RateConfiguration,
        request: ValidatedRequest,
        as_of: DateTime<Utc>,
    ) -> Result<Rating, RatingError> {
        let resolver = RuleResolver::new(config);
        let policy_type = request.policy_type;

        let base_rate = resolver.resolve_base_rate(policy_type).inspect_err(|err| {
            error!(
                policy_type = %policy_type,
                rate_version = %config.version(),
                error = %err,
                "Rate configuration has no base rate"
            );
        })?;
        let coverage_multiplier = resolver.resolve_coverage_multiplier(policy_type, request.coverage_amount);
        let age_multiplier = resolver.resolve_age_multiplier(policy_type, request.customer_age);
        let risk_multiplier = resolver.resolve_risk_multiplier(policy_type, request.risk_score);

        let currency: Currency = config.currency();
        let base_premium = [coverage_multiplier, age_multiplier, risk_multiplier]
            .into_iter()
            .try_fold(base_rate, |product, multiplier| product.checked_mul(multiplier))
            .map(|amount| Money::new(amount, currency))
            .ok_or_else(|| ConfigurationError::overflow("base premium", policy_type))
            .inspect_err(|err| log_overflow(config, err))?;

        let dynamic = resolver
            .resolve_dynamic_factor(&request, as_of)
            .inspect_err(|err| log_overflow(config, err))?;
        let dynamic_multiplier = dynamic
            .as_ref()
            .map(|adjustment| adjustment.multiplier)
            .unwrap_or(Decimal::ONE);
        let adjusted_rate = base_premium
            .amount()
            .checked_mul(dynamic_multiplier)
            .map(|amount| Money::new(amount, currency))
            .ok_or_else(|| ConfigurationError::overflow("adjusted rate", policy_type))
            .inspect_err(|err| log_overflow(config, err))?;

        let (discount, discounts) = resolver
            .resolve_discount(&request, adjusted_rate.amount())
            .inspect_err(|err| log_overflow(config, err))?;
        let discount_amount = Money::new(discount, currency);

        let unfloored = adjusted_rate - discount_amount;
        let final_premium = self.premium_floor.apply(unfloored);

        Ok(Rating {
            factors: Factors {
                base_multiplier: base_rate,
                coverage_multiplier,
                age_multiplier,
                risk_multiplier,
                dynamic_multiplier,
                discount_amount: discount,
                discounts,
            },
            dynamic,
            base_premium,
            adjusted_rate,
            discount_amount,
            floor_applied: final_premium != unfloored,
            final_premium,
            rate_version: config.version().to_string(),
            request,
        })
    }

    /// Read-only projection of the active snapshot's rate tables
    ///
    /// One entry per configured policy type, in policy-type order.
    pub fn get_rates(&self) -> RatesSnapshot {
        let snapshot = self.store.snapshot();
        let rates = PolicyType::ALL
            .into_iter()
            .filter_map(|policy_type| {
                snapshot.policy_rates(policy_type).map(|rates| RateSummary {
                    policy_type,
                    base_rate: rates.base,
                    coverage: rates.coverage.to_map(),
                })
            })
            .collect();

        RatesSnapshot {
            rates,
            version: snapshot.version().to_string(),
            timestamp: self.clock.now(),
        }
    }
}

fn log_overflow(config: &RateConfiguration, err: &ConfigurationError) {
    error!(
        rate_version = %config.version(),
        error = %err,
        "Premium calculation overflowed"
    );
}

impl std::fmt::Debug for RatingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingEngine")
            .field("store", &self.store)
            .field("premium_floor", &self.premium_floor)
            .finish_non_exhaustive()
    }
}
