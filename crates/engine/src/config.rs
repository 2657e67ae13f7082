//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and default to the reference service's
//! local development setup.
//!
//! - `STOCKROOM_API_BASE_URL` - Inventory service base URL
//!   (default: `http://localhost:7000`)
//! - `STOCKROOM_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `STOCKROOM_MAX_RETRIES` - Retries after the initial attempt
//!   (default: 3)
//! - `STOCKROOM_RETRY_DELAY_MS` - Fixed pause between attempts
//!   (default: 1000)

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::api::RetryPolicy;

/// Reference default for local development.
const DEFAULT_BASE_URL: &str = "http://localhost:7000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Inventory service base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout handed to the HTTP client.
    pub http_timeout: Duration,
    /// Retry policy for API calls.
    pub retry: RetryPolicy,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(
            "STOCKROOM_API_BASE_URL",
            &get_env_or_default("STOCKROOM_API_BASE_URL", DEFAULT_BASE_URL),
        )?;
        let http_timeout = Duration::from_secs(parse_number(
            "STOCKROOM_HTTP_TIMEOUT_SECS",
            &get_env_or_default("STOCKROOM_HTTP_TIMEOUT_SECS", "30"),
        )?);
        let retry = RetryPolicy {
            max_retries: parse_number(
                "STOCKROOM_MAX_RETRIES",
                &get_env_or_default("STOCKROOM_MAX_RETRIES", "3"),
            )?,
            delay: Duration::from_millis(parse_number(
                "STOCKROOM_RETRY_DELAY_MS",
                &get_env_or_default("STOCKROOM_RETRY_DELAY_MS", "1000"),
            )?),
        };

        Ok(Self {
            base_url,
            http_timeout,
            retry,
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate a base URL and strip any trailing slash so paths can be
/// appended directly.
fn parse_base_url(key: &str, value: &str) -> Result<String, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(value.trim_end_matches('/').to_string())
}

/// Parse an integer-valued environment variable.
fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
