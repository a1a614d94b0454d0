//! Client configuration
//!
//! `ClientConfig` can be built in code, loaded from a YAML or JSON file,
//! and overridden from `ENGAGE_*` environment variables.

use crate::error::{Error, Result};
use crate::pagination::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-Engage-Api-Key";

/// Environment variable names
pub const ENV_BASE_URL: &str = "ENGAGE_BASE_URL";
pub const ENV_API_KEY: &str = "ENGAGE_API_KEY";
pub const ENV_DEBUG: &str = "ENGAGE_DEBUG";
pub const ENV_TIMEOUT_SECS: &str = "ENGAGE_TIMEOUT_SECS";
pub const ENV_PAGE_SIZE: &str = "ENGAGE_PAGE_SIZE";

/// Configuration for [`EngageClient`](crate::EngageClient)
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Full URL of the Engage API endpoint
    pub base_url: String,

    /// API key issued by Engage
    pub api_key: String,

    /// Run the health check on construction and log request bodies
    pub debug: bool,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Page size used when collecting all pages
    pub page_size: u32,

    /// Override the default user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            debug: false,
            timeout_secs: 30,
            page_size: DEFAULT_PAGE_SIZE,
            user_agent: None,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("debug", &self.debug)
            .field("timeout_secs", &self.timeout_secs)
            .field("page_size", &self.page_size)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a config with the required fields
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load from a YAML or JSON file (chosen by extension, YAML otherwise)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Load from `ENGAGE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env()
    }

    /// Override fields from `ENGAGE_*` environment variables
    pub fn merge_env(self) -> Result<Self> {
        self.merge_vars(|name| std::env::var(name).ok())
    }

    /// Override fields from a variable lookup
    pub fn merge_vars<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(debug) = lookup(ENV_DEBUG) {
            self.debug = parse_bool(ENV_DEBUG, &debug)?;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = parse_number(ENV_TIMEOUT_SECS, &timeout)?;
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            self.page_size = parse_number(ENV_PAGE_SIZE, &size)?;
        }
        Ok(self)
    }

    /// Check that the config can be used to build a client
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        url::Url::parse(&self.base_url)?;
        if self.api_key.is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        if self.page_size == 0 {
            return Err(Error::config("page_size must be greater than 0"));
        }
        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::config(format!("{name}: expected a boolean, got '{other}'"))),
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("{name}: expected a number, got '{value}'")))
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Enable or disable debug mode
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs();
        self
    }

    /// Set the aggregation page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(agent.into());
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.page_size, 500);
        assert!(!config.debug);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .base_url("https://example.com/engage/api")
            .api_key("key")
            .debug(true)
            .timeout(Duration::from_secs(5))
            .page_size(100)
            .user_agent("tests/1.0")
            .build();

        assert_eq!(config.base_url, "https://example.com/engage/api");
        assert_eq!(config.api_key, "key");
        assert!(config.debug);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.page_size, 100);
        assert_eq!(config.user_agent.as_deref(), Some("tests/1.0"));
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::new("https://example.com", "key").validate().is_ok());

        let err = ClientConfig::new("", "key").validate().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "base_url"));

        let err = ClientConfig::new("not a url", "key").validate().unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = ClientConfig::new("https://example.com", "").validate().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "api_key"));

        let mut config = ClientConfig::new("https://example.com", "key");
        config.page_size = 0;
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::new("https://example.com", "super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_merge_vars() {
        let vars: HashMap<&str, &str> = [
            (ENV_BASE_URL, "https://env.example.com"),
            (ENV_API_KEY, "env-key"),
            (ENV_DEBUG, "yes"),
            (ENV_TIMEOUT_SECS, "12"),
            (ENV_PAGE_SIZE, "250"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::default()
            .merge_vars(|name| vars.get(name).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.base_url, "https://env.example.com");
        assert_eq!(config.api_key, "env-key");
        assert!(config.debug);
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.page_size, 250);
    }

    #[test]
    fn test_merge_vars_keeps_unset_fields() {
        let config = ClientConfig::new("https://file.example.com", "file-key")
            .merge_vars(|_| None)
            .unwrap();
        assert_eq!(config.base_url, "https://file.example.com");
        assert_eq!(config.api_key, "file-key");
    }

    #[test]
    fn test_merge_vars_rejects_bad_values() {
        let err = ClientConfig::default()
            .merge_vars(|name| (name == ENV_PAGE_SIZE).then(|| "lots".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_PAGE_SIZE));

        let err = ClientConfig::default()
            .merge_vars(|name| (name == ENV_DEBUG).then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "base_url: https://example.com/engage/api\napi_key: yaml-key\ndebug: true"
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://example.com/engage/api");
        assert_eq!(config.api_key, "yaml-key");
        assert!(config.debug);
        assert_eq!(config.page_size, 500);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"base_url": "https://example.com", "api_key": "json-key", "page_size": 50}}"#
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_key, "json-key");
        assert_eq!(config.page_size, 50);
        assert!(!config.debug);
    }

    #[test]
    fn test_from_missing_file() {
        let err = ClientConfig::from_file("/nonexistent/engage.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
