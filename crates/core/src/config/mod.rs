//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MARQUEE_*)
//! 2. TOML config file (if MARQUEE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MARQUEE_*)
/// 2. TOML config file (if MARQUEE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Site that page identifiers are resolved against.
    ///
    /// Set via MARQUEE_SOURCE_BASE_URL environment variable.
    #[serde(default = "default_source_base_url")]
    pub source_base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via MARQUEE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per request.
    ///
    /// Set via MARQUEE_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via MARQUEE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// How many siblings a download block walk may visit before giving up.
    ///
    /// Set via MARQUEE_MAX_SIBLING_HOPS environment variable.
    #[serde(default = "default_max_sibling_hops")]
    pub max_sibling_hops: usize,

    /// Minimum paragraph length for the synopsis paragraph scan.
    ///
    /// Set via MARQUEE_SYNOPSIS_MIN_CHARS environment variable.
    #[serde(default = "default_synopsis_min_chars")]
    pub synopsis_min_chars: usize,

    /// Concurrent page fetches for batch requests.
    ///
    /// Set via MARQUEE_MAX_CONCURRENCY environment variable.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_source_base_url() -> String {
    "https://vegamovies.ad".into()
}

fn default_user_agent() -> String {
    "marquee/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_sibling_hops() -> usize {
    10
}

fn default_synopsis_min_chars() -> usize {
    100
}

fn default_max_concurrency() -> usize {
    4
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_base_url: default_source_base_url(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            max_sibling_hops: default_max_sibling_hops(),
            synopsis_min_chars: default_synopsis_min_chars(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MARQUEE_`
    /// 2. TOML file from `MARQUEE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MARQUEE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("MARQUEE_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
