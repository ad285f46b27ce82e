use std::env;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub fetch_retry: FetchRetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the posting backend (no trailing slash).
    pub base_url: String,
    /// Per-request timeout in seconds for backend calls.
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchRetryConfig {
    /// Maximum attempts per request (first try included).
    pub max_attempts: u32,
    /// Initial backoff in seconds before the first retry.
    pub initial_backoff_seconds: u64,
    /// Cap for exponential backoff (seconds).
    pub max_backoff_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            backend: BackendConfig {
                base_url: env::var("BACKEND_URL")
                    .unwrap_or_else(|_| "http://localhost:5000".to_string())
                    .trim_end_matches('/')
                    .to_string(),
                request_timeout_seconds: env::var("BACKEND_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("BACKEND_TIMEOUT_SECONDS".to_string()))?,
            },
            fetch_retry: FetchRetryConfig {
                max_attempts: env::var("FETCH_RETRY_MAX_ATTEMPTS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .unwrap_or(3),
                initial_backoff_seconds: env::var("FETCH_RETRY_INITIAL_BACKOFF_SECONDS")
                    .unwrap_or_else(|_| "1".to_string())
                    .parse()
                    .unwrap_or(1u64),
                max_backoff_seconds: env::var("FETCH_RETRY_MAX_BACKOFF_SECONDS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30u64),
            },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend: BackendConfig {
                base_url: "http://localhost:5000".to_string(),
                request_timeout_seconds: 30,
            },
            fetch_retry: FetchRetryConfig {
                max_attempts: 3,
                initial_backoff_seconds: 1,
                max_backoff_seconds: 30,
            },
        }
    }
}
