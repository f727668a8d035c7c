//! Site API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::str::FromStr;

use gpi_core::pricing::FIXED_EUR_BGN_RATE;
use gpi_core::search::DEFAULT_SEARCH_LIMIT;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Site API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// HTTP server port
    pub port: u16,

    /// Shared secret expected in `x-revalidate-secret`.
    /// When unset every revalidation request is rejected.
    pub revalidate_secret: Option<String>,

    /// BGN per EUR, used when site settings leave the rate unset
    pub eur_to_bgn_rate: Decimal,

    /// Show BGN next to EUR, used when site settings leave the toggle unset
    pub show_bgn_price: bool,

    /// JSON content snapshot loaded at startup (optional)
    pub content_snapshot: Option<String>,

    /// Maximum search suggestions per query
    pub search_result_limit: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            port: 3001,
            revalidate_secret: None,
            eur_to_bgn_rate: FIXED_EUR_BGN_RATE,
            show_bgn_price: true,
            content_snapshot: None,
            search_result_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (env in production,
    /// a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SiteConfig::default();

        let config = SiteConfig {
            port: parse_or(&lookup, "SITE_API_PORT", defaults.port)?,

            revalidate_secret: lookup("REVALIDATE_SECRET").filter(|s| !s.is_empty()),

            eur_to_bgn_rate: parse_or(&lookup, "EUR_TO_BGN_RATE", defaults.eur_to_bgn_rate)?,

            show_bgn_price: parse_or(&lookup, "SHOW_BGN_PRICE", defaults.show_bgn_price)?,

            content_snapshot: lookup("CONTENT_SNAPSHOT").filter(|s| !s.is_empty()),

            search_result_limit: parse_or(
                &lookup,
                "SEARCH_RESULT_LIMIT",
                defaults.search_result_limit,
            )?,
        };

        // Validate the conversion rate
        if config.eur_to_bgn_rate <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue("EUR_TO_BGN_RATE".to_string()));
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<SiteConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SiteConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.port, 3001);
        assert_eq!(config.eur_to_bgn_rate, dec!(1.95583));
        assert!(config.revalidate_secret.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SITE_API_PORT", "8080"),
            ("REVALIDATE_SECRET", "s3cret"),
            ("SHOW_BGN_PRICE", "false"),
            ("SEARCH_RESULT_LIMIT", "5"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.revalidate_secret.as_deref(), Some("s3cret"));
        assert!(!config.show_bgn_price);
        assert_eq!(config.search_result_limit, 5);
    }

    #[test]
    fn test_empty_secret_is_unset() {
        let config = load(&[("REVALIDATE_SECRET", "")]).unwrap();
        assert!(config.revalidate_secret.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("SITE_API_PORT", "http")]),
            Err(ConfigError::InvalidValue(key)) if key == "SITE_API_PORT"
        ));
        assert!(load(&[("EUR_TO_BGN_RATE", "0")]).is_err());
        assert!(load(&[("EUR_TO_BGN_RATE", "-1.5")]).is_err());
        assert!(load(&[("SHOW_BGN_PRICE", "yes")]).is_err());
    }
}
