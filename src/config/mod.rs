//! Configuration module for the duty admin client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

use crate::errors::ClientError;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the duty scheduling API (normalized)
    pub base_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Per-request timeout handed to the HTTP client
    pub request_timeout: Duration,
    /// Number of entries kept in the activity log
    pub activity_limit: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = normalize_base_url(&lookup("DUTY_API_BASE_URL").unwrap_or_default());

        let log_level = lookup("DUTY_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let timeout_secs = match lookup("DUTY_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ClientError::Config(format!("Invalid DUTY_REQUEST_TIMEOUT_SECS: {}", raw))
            })?,
            None => 30,
        };

        let activity_limit = match lookup("DUTY_ACTIVITY_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                ClientError::Config(format!("Invalid DUTY_ACTIVITY_LIMIT: {}", raw))
            })?,
            None => 14,
        };

        Ok(Self {
            base_url,
            log_level,
            request_timeout: Duration::from_secs(timeout_secs),
            activity_limit,
        })
    }
}

/// Normalize a user-supplied base URL.
///
/// Blank input falls back to the default. Trailing slashes are removed, as is a
/// trailing `/ui`, `/docs` or `/redoc` segment so the address of the API's own
/// documentation pages can be pasted as-is.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let candidate = if trimmed.is_empty() {
        DEFAULT_BASE_URL
    } else {
        trimmed
    };

    let mut url = candidate.trim_end_matches('/');
    for suffix in ["/ui", "/docs", "/redoc"] {
        if let Some(stripped) = url.strip_suffix(suffix) {
            url = stripped;
            break;
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.activity_limit, 14);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DUTY_API_BASE_URL", "http://duty.local:9000/docs"),
            ("DUTY_LOG_LEVEL", "debug"),
            ("DUTY_REQUEST_TIMEOUT_SECS", "5"),
            ("DUTY_ACTIVITY_LIMIT", "3"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://duty.local:9000");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.activity_limit, 3);
    }

    #[test]
    fn test_invalid_timeout_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("DUTY_REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(""), "http://127.0.0.1:8000");
        assert_eq!(normalize_base_url("  "), "http://127.0.0.1:8000");
        assert_eq!(normalize_base_url("http://a:1///"), "http://a:1");
        assert_eq!(normalize_base_url("http://a:1/redoc"), "http://a:1");
        assert_eq!(normalize_base_url("http://a:1/ui/"), "http://a:1");
        assert_eq!(normalize_base_url("http://a:1/api"), "http://a:1/api");
    }
}
