//! Time handling for rating
//!
//! Pricing depends on "now" in two places: the calendar quarter used for
//! seasonality and the quote validity window. Both read from a [`Clock`] so
//! that a rating run can be replayed against a fixed instant.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u32),
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant, for replaying a rating run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Maps a calendar month (1-12) to its quarter
    pub fn from_month(month: u32) -> Result<Self, TemporalError> {
        match month {
            1..=3 => Ok(Quarter::Q1),
            4..=6 => Ok(Quarter::Q2),
            7..=9 => Ok(Quarter::Q3),
            10..=12 => Ok(Quarter::Q4),
            other => Err(TemporalError::InvalidMonth(other)),
        }
    }

    /// Returns the quarter containing the given date
    pub fn of_date(date: NaiveDate) -> Self {
        Self::from_month(date.month()).unwrap_or(Quarter::Q4)
    }

    /// Returns the quarter containing the given instant (in UTC)
    pub fn of_instant(instant: DateTime<Utc>) -> Self {
        Self::of_date(instant.date_naive())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
