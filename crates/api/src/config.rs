//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PROFILE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `PROFILE_HOST` - Bind address (default: 127.0.0.1)
//! - `PROFILE_PORT` - Listen port (default: 3000)
//! - `VIACEP_BASE_URL` - Postal lookup base URL (default: <https://viacep.com.br/ws>)
//! - `VIACEP_TIMEOUT_SECS` - Postal lookup timeout in seconds (default: 9)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `CORS_ORIGINS` - Comma-separated browser origins allowed to call the API (default: none)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default ViaCEP endpoint.
pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br/ws";

/// Default postal lookup timeout.
pub const DEFAULT_VIACEP_TIMEOUT_SECS: u64 = 9;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Postal lookup configuration
    pub viacep: ViaCepConfig,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Origins allowed by CORS; empty means same-origin only
    pub cors_origins: Vec<HeaderValue>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Postal code lookup configuration.
#[derive(Debug, Clone)]
pub struct ViaCepConfig {
    /// Base URL; requests go to `{base_url}/{zip}/json/`
    pub base_url: Url,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for ViaCepConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_VIACEP_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default ViaCEP URL is valid")),
            timeout: Duration::from_secs(DEFAULT_VIACEP_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
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

        let database_url = get_database_url("PROFILE_DATABASE_URL")?;
        let host = get_env_or_default("PROFILE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PROFILE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PROFILE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PROFILE_PORT".to_string(), e.to_string()))?;

        let viacep = ViaCepConfig::from_env()?;
        let log_json = parse_log_format(&get_env_or_default("LOG_FORMAT", "text"))?;
        let cors_origins = parse_cors_origins(&get_env_or_default("CORS_ORIGINS", ""))?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            host,
            port,
            viacep,
            log_json,
            cors_origins,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ViaCepConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&get_env_or_default(
            "VIACEP_BASE_URL",
            DEFAULT_VIACEP_BASE_URL,
        ))?;
        let timeout = parse_timeout(&get_env_or_default(
            "VIACEP_TIMEOUT_SECS",
            &DEFAULT_VIACEP_TIMEOUT_SECS.to_string(),
        ))?;

        Ok(Self { base_url, timeout })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the lookup base URL, dropping any trailing slash.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim_end_matches('/'))
        .map_err(|e| ConfigError::InvalidEnvVar("VIACEP_BASE_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "VIACEP_BASE_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// `json` selects structured logs; `text` the default formatter.
fn parse_log_format(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(true),
        "text" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            "LOG_FORMAT".to_string(),
            format!("expected 'text' or 'json', got '{other}'"),
        )),
    }
}

/// Split `https://a.example, https://b.example` into header values.
///
/// A wildcard is refused because the CORS layer allows credentials.
fn parse_cors_origins(value: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("CORS_ORIGINS".to_string(), reason);

    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin == "*" {
                return Err(invalid("wildcard origin is not allowed".to_string()));
            }
            let url = Url::parse(origin).map_err(|e| invalid(format!("{origin}: {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(invalid(format!("{origin}: unsupported scheme")));
            }
            HeaderValue::from_str(origin.trim_end_matches('/'))
                .map_err(|e| invalid(format!("{origin}: {e}")))
        })
        .collect()
}

/// Parse a positive whole number of seconds.
fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            "VIACEP_TIMEOUT_SECS".to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::InvalidEnvVar(
            "VIACEP_TIMEOUT_SECS".to_string(),
            e.to_string(),
        )),
    }
}
