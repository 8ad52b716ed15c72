//! Connection settings for the Notion API

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1/";
pub const DEFAULT_API_VERSION: &str = "2022-06-28";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token, sent as a bearer token
    pub token: String,
    /// API root; endpoint segments are appended to its path, with or
    /// without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value of the `Notion-Version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl NotionConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: default_base_url(),
            api_version: default_api_version(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load from `NOTION_TOKEN` (required), `NOTION_API_BASE`,
    /// `NOTION_VERSION` and `NOTION_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("NOTION_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingField("NOTION_TOKEN".to_string()))?;

        let mut config = Self::new(token);
        if let Some(base_url) = lookup("NOTION_API_BASE") {
            config.base_url = base_url;
        }
        if let Some(version) = lookup("NOTION_VERSION") {
            config.api_version = version;
        }
        if let Some(timeout) = lookup("NOTION_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|e| ConfigError::InvalidValue {
                key: "NOTION_TIMEOUT_SECS".to_string(),
                message: format!("{}", e),
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.is_empty() {
            return Err(ConfigError::MissingField("token".to_string()));
        }
        if let Err(e) = url::Url::parse(&self.base_url) {
            return Err(ConfigError::InvalidValue {
                key: "base_url".to_string(),
                message: e.to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn env_defaults() {
        let config = NotionConfig::from_lookup(lookup(&[("NOTION_TOKEN", "secret_abc")])).unwrap();
        assert_eq!(config.token, "secret_abc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn env_missing_token() {
        let err = NotionConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref k) if k == "NOTION_TOKEN"));
    }

    #[test]
    fn env_bad_timeout() {
        let err = NotionConfig::from_lookup(lookup(&[
            ("NOTION_TOKEN", "t"),
            ("NOTION_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("NOTION_TIMEOUT_SECS"));
    }

    #[test]
    fn toml_with_overrides() {
        let config = NotionConfig::from_toml_str(
            r#"
token = "secret_xyz"
base_url = "http://localhost:9000/v1/"
timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/v1/");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn toml_rejects_zero_timeout() {
        let err = NotionConfig::from_toml_str("token = \"t\"\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
