//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `source_base_url` is not an absolute http(s) URL
    /// - `max_sibling_hops` is outside 1..=100
    /// - `max_concurrency` is 0
    ///
    /// Returns `ConfigError::Missing` if `source_base_url` is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.source_base_url.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "source_base_url".into(),
                hint: "Set MARQUEE_SOURCE_BASE_URL environment variable".into(),
            });
        }
        match url::Url::parse(self.source_base_url.trim()) {
            Ok(u) if matches!(u.scheme(), "http" | "https") && u.host_str().is_some() => {}
            _ => {
                return Err(ConfigError::Invalid {
                    field: "source_base_url".into(),
                    reason: "must be an absolute http(s) URL".into(),
                });
            }
        }

        if self.max_sibling_hops == 0 || self.max_sibling_hops > 100 {
            return Err(ConfigError::Invalid {
                field: "max_sibling_hops".into(),
                reason: "must be between 1 and 100".into(),
            });
        }

        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid { field: "max_concurrency".into(), reason: "must be at least 1".into() });
        }
        if self.max_concurrency > 16 {
            tracing::warn!(
                max_concurrency = self.max_concurrency,
                "max_concurrency above 16 will be capped for batch requests"
            );
        }

        if self.synopsis_min_chars == 0 {
            tracing::warn!("synopsis_min_chars is 0; any non-empty paragraph can become the synopsis");
        }

        Ok(())
    }
}
