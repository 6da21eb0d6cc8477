//! Configuration module for the cinema admin client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

use crate::errors::AppError;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin of the REST API (scheme, host and port)
    pub api_url: String,
    /// Key sent in the `x-api-key` header, if the API requires one
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    pub const DEFAULT_API_URL: &'static str = "http://127.0.0.1:8080";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup (the environment, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("CINEMA_API_URL").unwrap_or_else(|| Self::DEFAULT_API_URL.to_string());
        match url::Url::parse(&api_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => {
                return Err(AppError::Config(format!(
                    "Invalid CINEMA_API_URL: {}",
                    api_url
                )))
            }
        }

        let api_key = lookup("CINEMA_API_KEY").filter(|key| !key.trim().is_empty());

        let timeout_secs = match lookup("CINEMA_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::Config(format!("Invalid CINEMA_TIMEOUT_SECS: {}", raw))
                })?,
            None => Self::DEFAULT_TIMEOUT_SECS,
        };

        let log_level = lookup("CINEMA_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            api_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
            log_level,
        })
    }
}
