//! Configuration module.

use axum::http::HeaderValue;
use serde::Deserialize;
use std::path::Path;

use crate::{BoardError, Result};

/// Environment variable overriding the listening port.
pub const ENV_PORT: &str = "POSTBOARD_PORT";
/// Environment variable overriding the store connection string.
pub const ENV_DATABASE_URL: &str = "POSTBOARD_DATABASE_URL";
/// Environment variable setting the single allowed frontend origin.
pub const ENV_FRONTEND_URL: &str = "POSTBOARD_FRONTEND_URL";

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Which post store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory; contents are lost on exit.
    Memory,
    /// SQLite database reached through `url`.
    #[default]
    Sqlite,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Store backend.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Connection string for the SQLite backend.
    #[serde(default = "default_db_url")]
    pub url: String,
}

fn default_db_url() -> String {
    "sqlite://data/postboard.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: default_db_url(),
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebConfig {
    /// CORS allowed origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/postboard.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BoardError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BoardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `POSTBOARD_PORT`: listening port
    /// - `POSTBOARD_DATABASE_URL`: store connection string
    /// - `POSTBOARD_FRONTEND_URL`: the only allowed CORS origin
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(port) = get(ENV_PORT) {
            self.server.port = port
                .parse()
                .map_err(|_| BoardError::Config(format!("{ENV_PORT} is not a valid port: {port}")))?;
        }
        if let Some(url) = get(ENV_DATABASE_URL) {
            self.database.url = url;
        }
        if let Some(origin) = get(ENV_FRONTEND_URL) {
            self.web.cors_origins = vec![origin];
        }
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The SQLite backend is selected without a connection string
    /// - A CORS origin is not a valid header value
    pub fn validate(&self) -> Result<()> {
        if self.database.backend == StoreBackend::Sqlite && self.database.url.trim().is_empty() {
            return Err(BoardError::Config(
                "sqlite backend selected but database.url is not set. \
                 Set it in config.toml or via POSTBOARD_DATABASE_URL environment variable."
                    .to_string(),
            ));
        }
        if let Some(origin) = self
            .web
            .cors_origins
            .iter()
            .find(|origin| origin.parse::<HeaderValue>().is_err())
        {
            return Err(BoardError::Config(format!("invalid CORS origin: {origin:?}")));
        }
        Ok(())
    }
}
