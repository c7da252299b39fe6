//! Rate configuration snapshots
//!
//! The store owns the currently active [`RateConfiguration`] behind an
//! `Arc`. Readers take a cheap clone of that `Arc` and keep using it for the
//! whole computation, so a replacement that lands mid-quote never mixes two
//! versions. Replacement validates first and swaps second: a rejected
//! configuration leaves the previous snapshot active.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::config::RateConfiguration;
use crate::error::ConfigurationError;

/// Holder of the active rate configuration snapshot
#[derive(Debug)]
pub struct RateConfigurationStore {
    current: RwLock<Arc<RateConfiguration>>,
    /// Forces the dynamic-pricing switch on every snapshot when set
    dynamic_override: Option<bool>,
}

impl RateConfigurationStore {
    /// Creates a store around an already validated configuration
    pub fn new(config: RateConfiguration) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
            dynamic_override: None,
        }
    }

    /// Creates a store whose snapshots always have dynamic pricing forced
    /// to `enabled`, regardless of what the configuration file says
    ///
    /// The override is applied to the initial configuration as well as to
    /// every later replacement.
    pub fn with_dynamic_override(config: RateConfiguration, enabled: Option<bool>) -> Self {
        let config = match enabled {
            Some(flag) => config.with_dynamic_pricing(flag),
            None => config,
        };
        Self {
            current: RwLock::new(Arc::new(config)),
            dynamic_override: enabled,
        }
    }

    /// Loads the initial snapshot from a JSON file
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the file cannot be read, is not a
    /// valid configuration document, or fails content validation.
    pub fn load_from_file(path: &Path, dynamic_override: Option<bool>) -> Result<Self, ConfigurationError> {
        let config = RateConfiguration::from_file(path)?;
        info!(
            path = %path.display(),
            version = %config.version(),
            policy_types = config.base_rates.len(),
            "Rate configuration loaded"
        );
        Ok(Self::with_dynamic_override(config, dynamic_override))
    }

    /// Returns the active snapshot
    ///
    /// The lock is held only long enough to clone the `Arc`.
    pub fn snapshot(&self) -> Arc<RateConfiguration> {
        // The guarded value is a single Arc, so a poisoned lock still holds
        // a complete snapshot.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Version label of the active snapshot
    pub fn version(&self) -> String {
        self.snapshot().version().to_string()
    }

    /// Validates and atomically installs a new snapshot
    ///
    /// Returns the snapshot that was replaced. In-flight readers holding the
    /// previous `Arc` are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an `Invalid` configuration error if the new configuration
    /// fails validation; the active snapshot is left untouched.
    pub fn replace(&self, next: RateConfiguration) -> Result<Arc<RateConfiguration>, ConfigurationError> {
        if let Err(err) = next.validate() {
            warn!(error = %err, "Rejected rate configuration replacement");
            return Err(err);
        }

        let next = match self.dynamic_override {
            Some(flag) => next.with_dynamic_pricing(flag),
            None => next,
        };
        let next = Arc::new(next);

        let previous = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, Arc::clone(&next))
        };

        info!(
            previous_version = %previous.version(),
            version = %next.version(),
            dynamic_pricing = next.is_dynamic_pricing_enabled(),
            "Rate configuration replaced"
        );

        Ok(previous)
    }

    /// Re-reads a configuration file and installs it
    ///
    /// # Errors
    ///
    /// Any read, parse, or validation failure; the active snapshot stays in
    /// place.
    pub fn reload_from_file(&self, path: &Path) -> Result<Arc<RateConfiguration>, ConfigurationError> {
        let next = RateConfiguration::from_file(path).inspect_err(|err| {
            warn!(path = %path.display(), error = %err, "Rate configuration reload failed");
        })?;
        self.replace(next)
    }
}
