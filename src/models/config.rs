//! Configuration for the verdant data layer.
//!
//! Everything tunable lives here and is resolved at startup from a TOML
//! file; every field has a default matching the production API.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Plant API endpoint configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// Plant API endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the plant API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retry budget carried in configuration; the fetch path does not
    /// consult it and performs exactly one attempt per call
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
}

fn default_base_url() -> String {
    "https://dummy-api-jtg6bessta-ey.a.run.app".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_retry_attempts() -> u32 {
    3
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            retry_attempts: default_retry_attempts(),
        }
    }
}

impl ApiConfig {
    /// Endpoint serving the category collection.
    pub fn categories_url(&self) -> String {
        format!("{}/getCategories", self.base_url.trim_end_matches('/'))
    }

    /// Endpoint serving the question collection.
    pub fn questions_url(&self) -> String {
        format!("{}/getQuestions", self.base_url.trim_end_matches('/'))
    }

    /// Configured request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })?;

        config.api.base_url = expand_env_vars(&config.api.base_url);
        Ok(config)
    }
}

/// Expand `${VAR_NAME}` placeholders from the environment.
///
/// Unset variables leave the placeholder unchanged.
pub fn expand_env_vars(s: &str) -> String {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = s.to_string();

    for cap in re.captures_iter(s) {
        if let Ok(value) = std::env::var(&cap[1]) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
