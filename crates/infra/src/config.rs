//! Configuration loading from environment variables.

use thiserror::Error;

use storefront_observability::LogFormat;

use crate::draft_store::DEFAULT_DRAFT_KEY;

pub const DRAFT_DATABASE_URL: &str = "STOREFRONT_DRAFT_DATABASE_URL";
pub const DRAFT_KEY: &str = "STOREFRONT_DRAFT_KEY";
pub const FALLBACK_IMAGE: &str = "STOREFRONT_FALLBACK_IMAGE";
pub const CURRENCY_SYMBOL: &str = "STOREFRONT_CURRENCY_SYMBOL";
pub const LOG_FORMAT: &str = "STOREFRONT_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// SQLite URL of the draft database.
    pub draft_database_url: String,
    /// Constant key of the singleton draft record.
    pub draft_key: String,
    /// Image given to committed products that had no upload.
    pub fallback_image: String,
    pub currency_symbol: String,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            draft_database_url: "sqlite::memory:".to_string(),
            draft_key: DEFAULT_DRAFT_KEY.to_string(),
            fallback_image: "/fallbackImage.png".to_string(),
            currency_symbol: "₹".to_string(),
            log_format: LogFormat::Json,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Build configuration with the given env-var lookup.
    ///
    /// Tests pass a `HashMap` lookup instead of touching the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let defaults = Self::default();
        let or_default = |var: &str, default: String| -> String {
            lookup(var)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let draft_key = lookup(DRAFT_KEY).unwrap_or(defaults.draft_key);
        if draft_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: DRAFT_KEY.to_string(),
                reason: "draft key cannot be blank".to_string(),
            });
        }

        let log_format = match lookup(LOG_FORMAT) {
            Ok(raw) => raw.parse().map_err(|e: storefront_observability::UnknownLogFormat| {
                ConfigError::InvalidEnvVar {
                    var: LOG_FORMAT.to_string(),
                    reason: e.to_string(),
                }
            })?,
            Err(_) => defaults.log_format,
        };

        Ok(Self {
            draft_database_url: or_default(DRAFT_DATABASE_URL, defaults.draft_database_url),
            draft_key: draft_key.trim().to_string(),
            fallback_image: or_default(FALLBACK_IMAGE, defaults.fallback_image),
            currency_symbol: or_default(CURRENCY_SYMBOL, defaults.currency_symbol),
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env::VarError;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.draft_key, "draft");
    }

    #[test]
    fn reads_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            (DRAFT_DATABASE_URL, "sqlite://drafts.db"),
            (DRAFT_KEY, "wizard"),
            (CURRENCY_SYMBOL, "$"),
            (LOG_FORMAT, "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.draft_database_url, "sqlite://drafts.db");
        assert_eq!(config.draft_key, "wizard");
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.fallback_image, "/fallbackImage.png");
    }

    #[test]
    fn rejects_blank_draft_key() {
        let err = StorefrontConfig::from_lookup(lookup(&[(DRAFT_KEY, "  ")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnvVar {
                var: DRAFT_KEY.to_string(),
                reason: "draft key cannot be blank".to_string(),
            }
        );
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = StorefrontConfig::from_lookup(lookup(&[(LOG_FORMAT, "xml")])).unwrap_err();
        match err {
            ConfigError::InvalidEnvVar { var, .. } => assert_eq!(var, LOG_FORMAT),
        }
    }
}
