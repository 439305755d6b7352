//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `BACKEND_URL` - Base URL of the catalog/checkout backend
//!   (fallback: `VITE_BACKEND_URL`, default: `http://localhost:8000`)
//! - `CATALOG_LIMIT` - Maximum products requested at startup (default: 50)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_CATALOG_LIMIT: u32 = 50;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Backend API configuration
    pub backend: BackendConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., "production")
    pub sentry_environment: Option<String>,
}

/// Backend API configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL without a trailing slash (e.g., `http://localhost:8000`)
    pub base_url: String,
    /// Number of products requested by the catalog load
    pub catalog_limit: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            catalog_limit: DEFAULT_CATALOG_LIMIT,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            backend: BackendConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let (key, raw) = get_backend_url();
        let base_url = parse_base_url(key, &raw)?;

        let catalog_limit = get_optional_env("CATALOG_LIMIT")
            .map_or(Ok(DEFAULT_CATALOG_LIMIT), |raw| {
                parse_catalog_limit(&raw)
            })?;

        Ok(Self {
            base_url,
            catalog_limit,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get the backend URL with fallback to the bundler-style `VITE_BACKEND_URL`.
///
/// Returns the variable name the value came from, for error messages.
fn get_backend_url() -> (&'static str, String) {
    if let Ok(value) = std::env::var("BACKEND_URL") {
        return ("BACKEND_URL", value);
    }
    if let Ok(value) = std::env::var("VITE_BACKEND_URL") {
        return ("VITE_BACKEND_URL", value);
    }
    ("BACKEND_URL", DEFAULT_BACKEND_URL.to_string())
}

/// Validate a backend base URL and strip any trailing slash.
fn parse_base_url(key: &str, raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

/// Parse the catalog limit, which must be at least 1.
fn parse_catalog_limit(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("CATALOG_LIMIT".to_string(), reason);
    match raw.parse::<u32>() {
        Ok(0) => Err(invalid("must be at least 1".to_string())),
        Ok(limit) => Ok(limit),
        Err(e) => Err(invalid(e.to_string())),
    }
}
