//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! ## Environment Variables
//! - `STOCKROOM_STORE_NAME`: name shown in the menu greeting
//! - `STOCKROOM_CATALOG`: path to a JSON catalog replacing the built-in one
//! - `STOCKROOM_LOG`: tracing filter used when `RUST_LOG` is unset

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Store name for the greeting ("Welcome to ...!")
    pub store_name: String,

    /// Optional catalog file; the built-in demo catalog is used otherwise
    pub catalog_path: Option<PathBuf>,

    /// Default tracing filter directive
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            store_name: "Best Buy".to_string(),
            catalog_path: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CliConfig::default();

        if let Some(store_name) = lookup("STOCKROOM_STORE_NAME") {
            let store_name = store_name.trim();
            if store_name.is_empty() {
                return Err(ConfigError::InvalidValue("STOCKROOM_STORE_NAME".to_string()));
            }
            config.store_name = store_name.to_string();
        }

        if let Some(path) = lookup("STOCKROOM_CATALOG") {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue("STOCKROOM_CATALOG".to_string()));
            }
            config.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup("STOCKROOM_LOG") {
            config.log_filter = filter;
        }

        Ok(config)
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
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CliConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::from_lookup(lookup_from(&[
            ("STOCKROOM_STORE_NAME", "Corner Shop"),
            ("STOCKROOM_CATALOG", "/tmp/catalog.json"),
            ("STOCKROOM_LOG", "stockroom_core=debug"),
        ]))
        .unwrap();

        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.log_filter, "stockroom_core=debug");
    }

    #[test]
    fn test_blank_values_rejected() {
        let err = CliConfig::from_lookup(lookup_from(&[("STOCKROOM_STORE_NAME", "  ")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for STOCKROOM_STORE_NAME");

        assert!(CliConfig::from_lookup(lookup_from(&[("STOCKROOM_CATALOG", "")])).is_err());
    }
}
