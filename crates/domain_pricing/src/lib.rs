//! Pricing Domain - Rule-driven premium rating
//!
//! This crate turns a quote request into a priced, auditable quote using a
//! versioned rate configuration:
//!
//! - **Configuration**: base rates, multiplier tables, discounts and dynamic
//!   factors loaded from JSON and validated once
//! - **Validation**: fail-fast request checks before any lookup
//! - **Rule resolution**: exact-match table lookups with neutral fallbacks
//! - **Engine**: the rating pipeline from base premium to final premium
//! - **Store**: atomically replaceable configuration snapshots
//!
//! # Example
//!
//! ```no_run
//! use domain_pricing::{QuoteRequest, RateConfiguration, RatingEngine};
//!
//! let config = RateConfiguration::from_file("data/pricing-rules.json".as_ref())?;
//! let engine = RatingEngine::from_configuration(config);
//!
//! let quote = engine.calculate_quote(&QuoteRequest {
//!     policy_type: "auto".to_string(),
//!     coverage_amount: 500_000,
//!     customer_age: 35,
//!     risk_score: 2,
//!     ..Default::default()
//! })?;
//! println!("{} {}", quote.quote_id, quote.final_premium);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod discount;
pub mod dynamic;
pub mod engine;
pub mod error;
pub mod quote;
pub mod resolver;
pub mod store;
pub mod tables;
pub mod validation;

pub use config::{DiscountSchedule, DynamicFactors, DynamicPricing, PolicyRates, RateConfiguration, RateMetadata};
pub use discount::DiscountBreakdown;
pub use dynamic::DynamicAdjustment;
pub use engine::{PremiumFloor, Rating, RatingEngine, QUOTE_VALIDITY_DAYS};
pub use error::{ConfigurationError, ConfigurationErrorKind, RatingError, ValidationError};
pub use quote::{Factors, PolicyType, Quote, QuoteRequest, RateSummary, RatesSnapshot};
pub use resolver::RuleResolver;
pub use store::RateConfigurationStore;
pub use tables::{AgeBracket, ClaimsBucket, LoyaltySchedule, MultiplierTable};
pub use validation::{QuoteValidator, ValidatedRequest};
