//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! rating engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: The reference rate configuration and fixed pricing instants
//! - `builders`: Builder patterns for quote requests and configurations
//! - `assertions`: Custom assertion helpers for quotes and decimals
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
