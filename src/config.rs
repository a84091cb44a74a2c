//! Application configuration loaded from environment variables.
//!
//! All configuration is loaded from environment variables with sensible defaults
//! for development. A `.env` file in the working directory is honoured.
//!
//! # Variables
//!
//! - `HOST` / `PORT`: bind address (default: `0.0.0.0:3000`)
//! - `MAX_REQUEST_BODY_SIZE`: request body limit in bytes (default: 1MB)
//! - `DENY_DELETE`: reject every DELETE with 403 (default: `true`)
//! - `CORS_ALLOWED_ORIGINS`: comma-separated list of allowed origins (default: `*`)
//! - `RUST_LOG`: log filter, read by the tracing subscriber in `main` (default: `info`)
//! - `METRICS_PORT`: Prometheus listener port (default: 0, disabled)

use std::env;
use std::net::SocketAddr;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables.
///
/// # Example
///
/// ```rust,ignore
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.server_addr());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Server host address (default: "0.0.0.0")
    pub host: String,

    /// Server port (default: 3000)
    pub port: u16,

    /// Maximum request body size in bytes (default: 1MB)
    pub max_request_body_size: usize,

    // =========================================================================
    // Access Control
    // =========================================================================
    /// Reject every DELETE request with 403 before routing (default: true).
    /// When false the `DELETE /todos/{id}` route becomes reachable.
    pub deny_delete: bool,

    /// Allowed CORS origins; "*" allows all origins
    pub cors_allowed_origins: Vec<String>,

    // =========================================================================
    // Observability Configuration
    // =========================================================================
    /// Port for Prometheus metrics endpoint (default: 0 = disabled)
    pub metrics_port: u16,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if any value fails to parse or
    /// validate (e.g., non-numeric PORT value).
    pub fn from_env() -> AppResult<Self> {
        // Load an .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: Self::parse_env("PORT", 3000)?,
            max_request_body_size: Self::parse_env("MAX_REQUEST_BODY_SIZE", 1024 * 1024)?,
            deny_delete: Self::parse_env("DENY_DELETE", true)?,
            cors_allowed_origins: Self::parse_cors_origins(),
            metrics_port: Self::parse_env("METRICS_PORT", 0)?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values for consistency and correctness.
    fn validate(&self) -> AppResult<()> {
        if self.max_request_body_size == 0 {
            return Err(AppError::ConfigError(
                "MAX_REQUEST_BODY_SIZE must be greater than 0".to_string(),
            ));
        }

        if self.host.trim().is_empty() {
            return Err(AppError::ConfigError("HOST cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Get the full server address for binding.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if Prometheus metrics export is enabled.
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_port > 0
    }

    /// Get the metrics endpoint address, or `None` when disabled.
    pub fn metrics_addr(&self) -> Option<SocketAddr> {
        self.metrics_enabled()
            .then(|| SocketAddr::from(([0, 0, 0, 0], self.metrics_port)))
    }

    /// Parse an environment variable into the specified type with a default value.
    fn parse_env<T>(name: &str, default: T) -> AppResult<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(name) {
            Ok(val) => Self::parse_value(name, &val),
            Err(_) => Ok(default),
        }
    }

    fn parse_value<T>(name: &str, val: &str) -> AppResult<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        val.trim()
            .parse()
            .map_err(|e| AppError::ConfigError(format!("Invalid {name}: {e}")))
    }

    fn parse_cors_origins() -> Vec<String> {
        Self::split_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()))
    }

    fn split_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Default configuration for testing and development.
///
/// Production deployments should use `Config::from_env()` instead.
impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_request_body_size: 1024 * 1024,
            deny_delete: true,
            cors_allowed_origins: vec!["*".to_string()],
            metrics_port: 0,
        }
    }
}
