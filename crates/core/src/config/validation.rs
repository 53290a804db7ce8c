//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;
use url::Url;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

fn require_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| invalid(field, format!("not a URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(field, format!("unsupported scheme: {scheme}"))),
    }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `query_timeout_ms` is less than 100ms or exceeds 1 minute
    /// - `user_agent` is empty
    /// - `start_url` (or `catalog_base_url` when the catalog is enabled) is not an http(s) URL
    /// - `max_pages` is zero
    /// - `generations` is outside 1..=9
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(invalid("max_bytes", "must be greater than 0"));
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(invalid("max_bytes", "must not exceed 50MB"));
        }

        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if !(100..=60_000).contains(&self.query_timeout_ms) {
            return Err(invalid("query_timeout_ms", "must be between 100ms and 60000ms"));
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        require_http_url("start_url", &self.start_url)?;

        if self.max_pages == Some(0) {
            return Err(invalid("max_pages", "must be greater than 0 when set"));
        }

        if !(1..=9).contains(&self.generations) {
            return Err(invalid("generations", "must be between 1 and 9"));
        }

        if self.catalog_enabled {
            require_http_url("catalog_base_url", &self.catalog_base_url)?;
        }

        if self.asset_prefix.is_empty() {
            tracing::warn!("asset_prefix is empty; sprite files will be named by their last path segment");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_bytes_zero() {
        let config = AppConfig { max_bytes: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_bytes"));
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_query_timeout_bounds() {
        let config = AppConfig { query_timeout_ms: 99, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "query_timeout_ms"));

        let config = AppConfig { query_timeout_ms: 60_000, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_start_url() {
        let config = AppConfig { start_url: "not a url".into(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "start_url"));

        let config = AppConfig { start_url: "ftp://www.serebii.net/".into(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "start_url"));
    }

    #[test]
    fn test_validate_max_pages_zero() {
        let config = AppConfig { max_pages: Some(0), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "max_pages"));
    }

    #[test]
    fn test_validate_generations() {
        let config = AppConfig { generations: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "generations"));

        let config = AppConfig { generations: 10, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_catalog_url_only_when_enabled() {
        let config = AppConfig { catalog_base_url: String::new(), ..Default::default() };
        assert!(config.validate().is_ok());

        let config = AppConfig { catalog_base_url: String::new(), catalog_enabled: true, ..Default::default() };
        assert!(
            matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "catalog_base_url")
        );
    }
}
