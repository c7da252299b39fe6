//! Core Kernel - Foundational types for the rating engine
//!
//! This crate provides the building blocks shared by the pricing domain and
//! the HTTP surface:
//! - Money types with precise decimal arithmetic and an explicit rounding policy
//! - Clock and calendar-quarter types for time-dependent pricing
//! - Strongly-typed quote identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{Clock, SystemClock, FixedClock, Quarter, TemporalError};
pub use identifiers::QuoteId;
