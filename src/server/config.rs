use std::{str::FromStr, time::Duration};

use crate::server::error::config::ConfigError;

/// Server configuration loaded from environment variables.
pub struct Config {
    /// Base URL of the upstream section providers
    pub section_api_url: String,
    /// Valkey/Redis URL backing the session store
    pub valkey_url: String,
    /// Address the HTTP server listens on
    pub bind_addr: String,
    /// Per-attempt timeout for a single section fetch
    pub fetch_timeout: Duration,
    /// Attempts per section fetch, including the first
    pub fetch_max_attempts: u32,
    /// Backoff before the first retry, doubled for each subsequent retry
    pub fetch_initial_backoff: Duration,
}

impl Config {
    const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:8080";
    const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 120;
    const DEFAULT_FETCH_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_FETCH_BACKOFF_MS: u64 = 1000;

    pub fn from_env() -> Result<Self, ConfigError> {
        let fetch_max_attempts =
            optional("SECTION_FETCH_MAX_ATTEMPTS", Self::DEFAULT_FETCH_MAX_ATTEMPTS)?;
        if fetch_max_attempts == 0 {
            return Err(ConfigError::InvalidEnvValue {
                var: "SECTION_FETCH_MAX_ATTEMPTS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            section_api_url: required("SECTION_API_URL")?,
            valkey_url: required("VALKEY_URL")?,
            bind_addr: optional("BIND_ADDR", Self::DEFAULT_BIND_ADDR.to_string())?,
            fetch_timeout: Duration::from_secs(optional(
                "SECTION_FETCH_TIMEOUT_SECS",
                Self::DEFAULT_FETCH_TIMEOUT_SECS,
            )?),
            fetch_max_attempts,
            fetch_initial_backoff: Duration::from_millis(optional(
                "SECTION_FETCH_BACKOFF_MS",
                Self::DEFAULT_FETCH_BACKOFF_MS,
            )?),
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
