//! YAML configuration file support.
//!
//! One file configures the normalizer, the matcher thresholds, the location
//! cache and logging. Every section is optional and falls back to the
//! library defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! canonical:
//!   version: 1
//!   prefix_mode: substring      # or word_boundary
//!   extra_prefixes: []
//!
//! matcher:
//!   best_match_threshold: 0.6
//!   legacy_compare_threshold: 0.7
//!
//! cache:
//!   ttl_secs: 86400
//!   key_prefix: "nhanh_cache_"
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```

use std::fs;
use std::path::Path;

use canonical::{CanonicalError, CanonicalizeConfig};
use locations::{CacheConfig, LocationError};
use matcher::{MatchConfig, MatchError, Matcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

impl From<CanonicalError> for ConfigLoadError {
    fn from(err: CanonicalError) -> Self {
        ConfigLoadError::Validation(format!("canonical: {err}"))
    }
}

impl From<MatchError> for ConfigLoadError {
    fn from(err: MatchError) -> Self {
        ConfigLoadError::Validation(format!("matcher: {err}"))
    }
}

impl From<LocationError> for ConfigLoadError {
    fn from(err: LocationError) -> Self {
        ConfigLoadError::Validation(format!("cache: {err}"))
    }
}

/// Top-level YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AddrMatchConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub canonical: CanonicalizeConfig,

    #[serde(default)]
    pub matcher: MatchConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AddrMatchConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AddrMatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical.validate()?;
        self.matcher.validate()?;
        self.cache.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Matcher built from the `canonical` and `matcher` sections.
    pub fn build_matcher(&self) -> Result<Matcher, ConfigLoadError> {
        Ok(Matcher::new(&self.canonical, self.matcher)?)
    }
}

impl Default for AddrMatchConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            canonical: CanonicalizeConfig::default(),
            matcher: MatchConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging section; consumed by the binary when installing the subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env-filter directive, e.g. `"info"` or
    /// `"matcher=debug,info"`.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
