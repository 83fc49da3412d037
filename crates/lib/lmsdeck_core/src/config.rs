//! Deck configuration.

use thiserror::Error;

use crate::integration::CallerContext;

/// Default API base URL for local development.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:18000";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}

/// Settings for talking to the integrated-channels API.
#[derive(Clone, Debug)]
pub struct DeckConfig {
    /// LMS base URL (e.g. "https://courses.example.com").
    pub api_base_url: String,
    /// Owning enterprise, copied into every update payload.
    pub enterprise_customer: Option<String>,
    /// Bearer token for the API.
    pub api_token: Option<String>,
    /// Integration reporting feature flag (gates sync history).
    pub sync_history_enabled: bool,
}

impl DeckConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                        | Default                  |
    /// |---------------------------------|--------------------------|
    /// | `LMS_API_BASE_URL`              | `http://localhost:18000` |
    /// | `ENTERPRISE_CUSTOMER_UUID`      | unset                    |
    /// | `LMS_API_TOKEN`                 | unset                    |
    /// | `FEATURE_INTEGRATION_REPORTING` | `false`                  |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_base_url: non_empty("LMS_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.into()),
            enterprise_customer: non_empty("ENTERPRISE_CUSTOMER_UUID"),
            api_token: non_empty("LMS_API_TOKEN"),
            sync_history_enabled: lookup("FEATURE_INTEGRATION_REPORTING")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// The enterprise id, required for any mutation.
    pub fn enterprise_customer(&self) -> Result<&str, ConfigError> {
        self.enterprise_customer
            .as_deref()
            .ok_or(ConfigError::Missing("ENTERPRISE_CUSTOMER_UUID"))
    }

    /// Caller context for this deck and the given user.
    pub fn caller(&self, is_administrator: bool) -> CallerContext {
        CallerContext {
            is_administrator,
            sync_history_enabled: self.sync_history_enabled,
        }
    }
}

/// Parse a boolean feature flag: `1`, `true`, `yes`, `on` (any case).
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = DeckConfig::from_lookup(lookup(&[]));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.enterprise_customer.is_none());
        assert!(config.api_token.is_none());
        assert!(!config.sync_history_enabled);
        assert!(matches!(
            config.enterprise_customer(),
            Err(ConfigError::Missing("ENTERPRISE_CUSTOMER_UUID"))
        ));
    }

    #[test]
    fn reads_all_variables() {
        let config = DeckConfig::from_lookup(lookup(&[
            ("LMS_API_BASE_URL", "https://lms.example.com"),
            ("ENTERPRISE_CUSTOMER_UUID", "test-enterprise-id"),
            ("LMS_API_TOKEN", "jwt"),
            ("FEATURE_INTEGRATION_REPORTING", "True"),
        ]));
        assert_eq!(config.api_base_url, "https://lms.example.com");
        assert_eq!(config.enterprise_customer().unwrap(), "test-enterprise-id");
        assert_eq!(config.api_token.as_deref(), Some("jwt"));
        assert!(config.sync_history_enabled);
        assert_eq!(
            config.caller(true),
            CallerContext {
                is_administrator: true,
                sync_history_enabled: true
            }
        );
    }

    #[test]
    fn blank_values_are_unset() {
        let config = DeckConfig::from_lookup(lookup(&[
            ("LMS_API_BASE_URL", " "),
            ("ENTERPRISE_CUSTOMER_UUID", ""),
        ]));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.enterprise_customer.is_none());
    }

    #[test]
    fn parse_flag_accepts_common_truthy_values() {
        for v in ["1", "true", "YES", " on "] {
            assert!(parse_flag(v), "{v}");
        }
        for v in ["0", "false", "off", ""] {
            assert!(!parse_flag(v), "{v}");
        }
    }
}
