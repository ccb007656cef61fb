//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TUHOGAR_CATALOG_URL` - Base URL of the remote catalog service
//!
//! ## Optional
//! - `TUHOGAR_STATE_DIR` - Directory for persisted engine state
//!   (default: `.tuhogar`)
//! - `TUHOGAR_SESSION_TTL_SECS` - Session lifetime in seconds
//!   (default: 1800)

use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_STATE_DIR: &str = ".tuhogar";
const DEFAULT_SESSION_TTL_SECS: &str = "1800";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the remote catalog service
    pub catalog_url: Url,
    /// Directory holding persisted cart/session state
    pub state_dir: PathBuf,
    /// Fixed session lifetime
    pub session_ttl: Duration,
}

impl StorefrontConfig {
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

        let catalog_url = get_required_env("TUHOGAR_CATALOG_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("TUHOGAR_CATALOG_URL".to_string(), e.to_string())
            })?;
        let state_dir =
            PathBuf::from(get_env_or_default("TUHOGAR_STATE_DIR", DEFAULT_STATE_DIR));
        let session_ttl = parse_ttl_secs(&get_env_or_default(
            "TUHOGAR_SESSION_TTL_SECS",
            DEFAULT_SESSION_TTL_SECS,
        ))
        .map_err(|e| ConfigError::InvalidEnvVar("TUHOGAR_SESSION_TTL_SECS".to_string(), e))?;

        Ok(Self {
            catalog_url,
            state_dir,
            session_ttl,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a positive TTL in whole seconds.
fn parse_ttl_secs(value: &str) -> Result<Duration, String> {
    let secs: i64 = value
        .parse()
        .map_err(|_| format!("not a whole number of seconds: {value}"))?;
    if secs <= 0 {
        return Err(format!("session TTL must be positive (got {secs})"));
    }
    Ok(Duration::seconds(secs))
}
