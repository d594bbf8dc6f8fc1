//! Field configuration
//!
//! Defaults match the hosted widget: 300 ms debounce against the public
//! reference API. Values can come from TOML and be overridden by
//! `DEXFIELD_API_BASE_URL` / `DEXFIELD_DEBOUNCE_MS`.

use crate::error::ConfigError;
use dex_lookup::{LookupConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment override for [`FieldConfig::api_base_url`]
pub const ENV_API_BASE_URL: &str = "DEXFIELD_API_BASE_URL";
/// Environment override for [`FieldConfig::debounce_ms`]
pub const ENV_DEBOUNCE_MS: &str = "DEXFIELD_DEBOUNCE_MS";

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Quiescence window before a search term is committed
    pub debounce_ms: u64,
    /// Reference API root
    pub api_base_url: String,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Custom `User-Agent`; the lookup client's default when unset
    pub user_agent: Option<String>,
}

impl FieldConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With debounce window
    #[inline]
    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// With API root
    #[inline]
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Parse TOML
    ///
    /// # Errors
    /// `ConfigError::Parse` for malformed input, `ConfigError::Invalid` for
    /// out-of-range values
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read TOML from a file
    ///
    /// # Errors
    /// `ConfigError::Read` if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Apply environment overrides from the process environment
    ///
    /// # Errors
    /// `ConfigError::Invalid` if an override does not parse
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    ///
    /// # Errors
    /// `ConfigError::Invalid` if an override does not parse
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(ms) = lookup(ENV_DEBOUNCE_MS) {
            self.debounce_ms = ms.trim().parse().map_err(|e| ConfigError::Invalid {
                key: "debounce_ms",
                reason: format!("{ENV_DEBOUNCE_MS}={ms}: {e}"),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `ConfigError::Invalid` naming the first bad key
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "request_timeout_secs",
                reason: "must be positive".to_string(),
            });
        }
        let raw = self.api_base_url.trim();
        let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
            key: "api_base_url",
            reason: format!("{raw}: {e}"),
        })?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                key: "api_base_url",
                reason: format!("not an http(s) url: {raw}"),
            });
        }
        Ok(())
    }

    /// Debounce window as a duration
    #[inline]
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Settings for the lookup client
    #[must_use]
    pub fn lookup_config(&self) -> LookupConfig {
        let defaults = LookupConfig::default();
        LookupConfig {
            base_url: self.api_base_url.trim().to_string(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            user_agent: None,
        }
    }
}
