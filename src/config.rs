//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::str::FromStr;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CLICK_THRESHOLD_MS: i64 = 200;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the schedule backend (no trailing slash)
    pub schedule_api_url: String,
    /// Bearer token for the schedule backend, if it wants one
    pub schedule_api_token: Option<String>,
    /// Optional per-request timeout; `None` keeps the HTTP client default
    pub schedule_api_timeout_secs: Option<u64>,
    /// Dashboard origin allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Pointer press shorter than this (and without movement) is a click
    pub click_threshold_ms: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule_api_url: DEFAULT_API_URL.to_string(),
            schedule_api_token: None,
            schedule_api_timeout_secs: None,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            port: DEFAULT_PORT,
            click_threshold_ms: DEFAULT_CLICK_THRESHOLD_MS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            schedule_api_url: env::var("SCHEDULE_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            schedule_api_token: env::var("SCHEDULE_API_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            schedule_api_timeout_secs: parse_optional("SCHEDULE_API_TIMEOUT_SECS")?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            port: parse_optional("PORT")?.unwrap_or(DEFAULT_PORT),
            click_threshold_ms: parse_optional("CLICK_THRESHOLD_MS")?
                .unwrap_or(DEFAULT_CLICK_THRESHOLD_MS),
        })
    }

    /// Fixed configuration for tests.
    pub fn test_default() -> Self {
        Self {
            schedule_api_url: "http://127.0.0.1:9/api".to_string(),
            ..Self::default()
        }
    }
}

fn parse_optional<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(name, raw)),
        _ => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
