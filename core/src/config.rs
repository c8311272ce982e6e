//! Endpoint configuration for the user API.
//!
//! Defaults point at a mock server on localhost. Each field can be
//! overridden from the environment so the same binary can target staging
//! or production hosts.

use std::env;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_API_PATH: &str = "/api/user/";
pub const DEFAULT_LIST_ENDPOINT: &str = "all";
pub const DEFAULT_STORE_ENDPOINT: &str = "store";

const ENV_BASE_URL: &str = "USERLIST_BASE_URL";
const ENV_API_PATH: &str = "USERLIST_API_PATH";
const ENV_LIST_ENDPOINT: &str = "USERLIST_LIST_ENDPOINT";
const ENV_STORE_ENDPOINT: &str = "USERLIST_STORE_ENDPOINT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Where the user endpoints live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_path: String,
    pub list_endpoint: String,
    pub store_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            list_endpoint: DEFAULT_LIST_ENDPOINT.to_string(),
            store_endpoint: DEFAULT_STORE_ENDPOINT.to_string(),
        }
    }
}

impl ApiConfig {
    /// Defaults with `base_url` replaced.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Read overrides from `USERLIST_*` variables on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            base_url: lookup(ENV_BASE_URL).unwrap_or(defaults.base_url),
            api_path: lookup(ENV_API_PATH).unwrap_or(defaults.api_path),
            list_endpoint: lookup(ENV_LIST_ENDPOINT).unwrap_or(defaults.list_endpoint),
            store_endpoint: lookup(ENV_STORE_ENDPOINT).unwrap_or(defaults.store_endpoint),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        for (field, value) in [
            ("list endpoint", &self.list_endpoint),
            ("store endpoint", &self.store_endpoint),
        ] {
            if value.trim_matches('/').is_empty() {
                return Err(ConfigError::Invalid(format!("{field} is empty")));
            }
        }
        Ok(())
    }

    pub fn list_url(&self) -> String {
        self.endpoint_url(&self.list_endpoint)
    }

    pub fn store_url(&self) -> String {
        self.endpoint_url(&self.store_endpoint)
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        let endpoint = endpoint.trim_matches('/');
        if path.is_empty() {
            format!("{base}/{endpoint}")
        } else {
            format!("{base}/{path}/{endpoint}")
        }
    }
}
