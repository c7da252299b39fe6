//! API configuration

use std::path::PathBuf;

use domain_pricing::PremiumFloor;
use serde::Deserialize;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    /// Human-readable lines
    Pretty,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Rate configuration file, read at startup and on reload
    pub rates_path: PathBuf,
    /// Log level
    pub log_level: String,
    pub log_format: LogFormat,
    /// Forces dynamic pricing on or off regardless of the rate file
    pub dynamic_rates: Option<bool>,
    /// Whether final premiums may go below zero
    pub premium_floor: PremiumFloor,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8003,
            rates_path: PathBuf::from("data/pricing-rules.json"),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            dynamic_rates: None,
            premium_floor: PremiumFloor::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `PRICING_*` environment variables
    ///
    /// Unset variables keep their defaults, e.g. `PRICING_PORT=9000`
    /// overrides only the port.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("PRICING").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8003");
        assert_eq!(config.rates_path, PathBuf::from("data/pricing-rules.json"));
        assert_eq!(config.premium_floor, PremiumFloor::Unclamped);
        assert_eq!(config.dynamic_rates, None);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: ApiConfig = config::Config::builder()
            .set_override("port", 9100)
            .unwrap()
            .set_override("premium_floor", "zero")
            .unwrap()
            .set_override("log_format", "pretty")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.premium_floor, PremiumFloor::Zero);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.host, "0.0.0.0");
    }
}
