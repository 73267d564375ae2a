//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GUARANA_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   the generic `DATABASE_URL`)
//!
//! ## Optional
//! - `GUARANA_HOST` - Bind address (default: 0.0.0.0)
//! - `GUARANA_PORT` - Listen port (default: 5000)
//! - `GUARANA_ENV` - `development` (default) or anything else for production
//! - `GUARANA_STATIC_DIR` - Prebuilt frontend bundle directory (default: dist/public)
//! - `CEP_BASE_URL` - Postal lookup service base URL (default: <https://viacep.com.br/ws>)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Deployment environment the server runs in.
///
/// Production requires the static asset directory to exist at startup;
/// development tolerates its absence and serves the API only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse a `GUARANA_ENV` value. Only the literal `development` selects
    /// development mode; any other value means production.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "development" {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Whether this is the production environment.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Directory holding the prebuilt frontend bundle
    pub static_dir: String,
    /// Base URL of the postal lookup service
    pub cep_base_url: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing or a variable
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("GUARANA_DATABASE_URL")?;
        let host = get_env_or_default("GUARANA_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("GUARANA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("GUARANA_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("GUARANA_PORT".to_string(), e.to_string()))?;
        let environment =
            get_optional_env("GUARANA_ENV").map_or(Environment::Development, |v| {
                Environment::parse(&v)
            });
        let static_dir = get_env_or_default("GUARANA_STATIC_DIR", "dist/public");
        let cep_base_url = normalize_base_url(get_env_or_default(
            "CEP_BASE_URL",
            "https://viacep.com.br/ws",
        ));
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            environment,
            static_dir,
            cep_base_url,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
impl ServerConfig {
    /// Configuration for in-process router tests.
    pub(crate) fn for_tests(cep_base_url: impl Into<String>) -> Self {
        Self {
            database_url: SecretString::from("postgres://localhost/test"),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            environment: Environment::Development,
            static_dir: "dist/public".to_string(),
            cep_base_url: normalize_base_url(cep_base_url.into()),
            sentry_dsn: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (set by managed
/// Postgres attachments).
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
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Trim trailing slashes so lookup URLs can be built by simple joins.
fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
