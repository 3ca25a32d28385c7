//! Application configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;

/// Default auth service address, matching the development backend.
pub const DEFAULT_AUTH_URL: &str = "http://localhost:8082/auth";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the auth service
    pub auth_base_url: String,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// Deadline for one full resolution pass
    pub resolve_timeout: Duration,
    /// Cadence of the periodic re-validation task
    pub revalidate_interval: Duration,
}

impl Config {
    /// Configuration with environment overrides applied.
    ///
    /// Recognized variables: `VIGIL_AUTH_URL`, `VIGIL_REQUEST_TIMEOUT_MS`,
    /// `VIGIL_RESOLVE_TIMEOUT_MS`, `VIGIL_REVALIDATE_INTERVAL_SECS`.
    pub fn from_env() -> Result<Self, CoreError> {
        let mut config = Config::default();

        if let Ok(value) = std::env::var("VIGIL_AUTH_URL") {
            url::Url::parse(&value)
                .map_err(|e| CoreError::Config(format!("VIGIL_AUTH_URL: {e}")))?;
            config.auth_base_url = value;
        }

        if let Some(ms) = env_u64("VIGIL_REQUEST_TIMEOUT_MS")? {
            config.request_timeout = Duration::from_millis(ms);
        }

        if let Some(ms) = env_u64("VIGIL_RESOLVE_TIMEOUT_MS")? {
            config.resolve_timeout = Duration::from_millis(ms);
        }

        if let Some(secs) = env_u64("VIGIL_REVALIDATE_INTERVAL_SECS")? {
            config.revalidate_interval = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            resolve_timeout: Duration::from_secs(5),
            revalidate_interval: Duration::from_secs(15 * 60),
        }
    }
}

fn env_u64(name: &str) -> Result<Option<u64>, CoreError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| CoreError::Config(format!("{name} must be an integer, got {value:?}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.auth_base_url, DEFAULT_AUTH_URL);
        assert_eq!(config.resolve_timeout, Duration::from_secs(5));
        assert_eq!(config.revalidate_interval, Duration::from_secs(900));
    }

    #[test]
    fn test_env_overrides() {
        // One test covers all variables; env vars are process-global
        std::env::set_var("VIGIL_AUTH_URL", "http://auth.internal:9000/auth");
        std::env::set_var("VIGIL_RESOLVE_TIMEOUT_MS", "2500");

        let config = Config::from_env().unwrap();
        assert_eq!(config.auth_base_url, "http://auth.internal:9000/auth");
        assert_eq!(config.resolve_timeout, Duration::from_millis(2500));
        // Untouched fields keep their defaults
        assert_eq!(config.request_timeout, Duration::from_secs(10));

        std::env::set_var("VIGIL_RESOLVE_TIMEOUT_MS", "not-a-number");
        assert!(Config::from_env().is_err());

        std::env::remove_var("VIGIL_AUTH_URL");
        std::env::remove_var("VIGIL_RESOLVE_TIMEOUT_MS");
    }
}
