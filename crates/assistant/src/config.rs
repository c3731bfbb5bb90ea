//! Assistant configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PLANWISE_AI_BASE_URL` - Base URL of the AI service (e.g., <https://ai.planwise.example>)
//!
//! ## Optional
//! - `PLANWISE_AI_API_KEY` - API key sent as `x-api-key` header
//! - `PLANWISE_AI_TIMEOUT_SECS` - AI request timeout in seconds (default: 30)
//! - `PLANWISE_STORAGE_PATH` - Path of the JSON session store; in-memory
//!   storage is used when unset

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default timeout for AI requests, in seconds.
const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Assistant application configuration.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// AI service configuration.
    pub ai: AiConfig,
    /// Path of the durable JSON store. `None` keeps auth state in memory.
    pub storage_path: Option<PathBuf>,
}

/// AI service configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AiConfig {
    /// Base URL of the AI service.
    pub base_url: Url,
    /// API key sent with every request, if configured.
    pub api_key: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AssistantConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            ai: AiConfig::from_env()?,
            storage_path: get_optional_env("PLANWISE_STORAGE_PATH").map(PathBuf::from),
        })
    }
}

impl AiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("PLANWISE_AI_BASE_URL")?;
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("PLANWISE_AI_BASE_URL".to_string(), e.to_string())
        })?;

        let api_key = get_optional_env("PLANWISE_AI_API_KEY").map(SecretString::from);

        let timeout_secs = match get_optional_env("PLANWISE_AI_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("PLANWISE_AI_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_AI_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
