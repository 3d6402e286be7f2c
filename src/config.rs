//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export LISTEN="0.0.0.0:8080"
//! export DB_PATH="/var/lib/boltlink/links.db"
//! export READ_TIMEOUT=1
//! export WRITE_TIMEOUT=1
//! export IDLE_TIMEOUT=30
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `DB_PATH` - Store location (default: `urlshortner.db`)
//! - `COLLECTION_NAME` - Tree holding the links (default: `shorturls`)
//! - `READ_TIMEOUT` - Seconds allowed to receive a request body (default: 1)
//! - `WRITE_TIMEOUT` - Seconds allowed to produce a response (default: 1)
//! - `IDLE_TIMEOUT` - Seconds an idle keep-alive connection is kept (default: 30)
//! - `ID_LENGTH_BYTES` - Random bytes per short ID (default: 4, range: 4-32)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::id_generator::{
    DEFAULT_ID_LENGTH_BYTES, MAX_ID_LENGTH_BYTES, MIN_ID_LENGTH_BYTES,
};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    /// Name of the `sled` tree holding the links.
    pub collection_name: String,
    /// Body read timeout in seconds (`READ_TIMEOUT`).
    pub read_timeout: u64,
    /// Handler/response timeout in seconds (`WRITE_TIMEOUT`).
    pub write_timeout: u64,
    /// Keep-alive idle timeout in seconds (`IDLE_TIMEOUT`).
    pub idle_timeout: u64,
    /// Random bytes per generated short ID. The default 4 bytes give a 2^32
    /// ID space; raise it for large stores.
    pub id_length_bytes: usize,
    pub log_level: String,
    pub log_format: String,
}

/// Connection and request time limits derived from [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub read: Duration,
    pub write: Duration,
    pub idle: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            read: Duration::from_secs(1),
            write: Duration::from_secs(1),
            idle: Duration::from_secs(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            db_path: "urlshortner.db".to_string(),
            collection_name: "shorturls".to_string(),
            read_timeout: 1,
            write_timeout: 1,
            idle_timeout: 30,
            id_length_bytes: DEFAULT_ID_LENGTH_BYTES,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

/// Reads `key` and parses it, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Every variable is optional; unset or unparsable numbers fall back to
    /// their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: env::var("LISTEN").unwrap_or(defaults.listen_addr),
            db_path: env::var("DB_PATH").unwrap_or(defaults.db_path),
            collection_name: env::var("COLLECTION_NAME").unwrap_or(defaults.collection_name),
            read_timeout: env_or("READ_TIMEOUT", defaults.read_timeout),
            write_timeout: env_or("WRITE_TIMEOUT", defaults.write_timeout),
            idle_timeout: env_or("IDLE_TIMEOUT", defaults.idle_timeout),
            id_length_bytes: env_or("ID_LENGTH_BYTES", defaults.id_length_bytes),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not in `host:port` form
    /// - `db_path` or `collection_name` is empty
    /// - any timeout is zero
    /// - `id_length_bytes` is outside 4-32
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.db_path.trim().is_empty() {
            anyhow::bail!("DB_PATH must not be empty");
        }

        if self.collection_name.is_empty() {
            anyhow::bail!("COLLECTION_NAME must not be empty");
        }

        if self.read_timeout == 0 {
            anyhow::bail!("READ_TIMEOUT must be greater than 0");
        }
        if self.write_timeout == 0 {
            anyhow::bail!("WRITE_TIMEOUT must be greater than 0");
        }
        if self.idle_timeout == 0 {
            anyhow::bail!("IDLE_TIMEOUT must be greater than 0");
        }

        if !(MIN_ID_LENGTH_BYTES..=MAX_ID_LENGTH_BYTES).contains(&self.id_length_bytes) {
            anyhow::bail!(
                "ID_LENGTH_BYTES must be between {} and {}, got {}",
                MIN_ID_LENGTH_BYTES,
                MAX_ID_LENGTH_BYTES,
                self.id_length_bytes
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    pub fn timeouts(&self) -> HttpTimeouts {
        HttpTimeouts {
            read: Duration::from_secs(self.read_timeout),
            write: Duration::from_secs(self.write_timeout),
            idle: Duration::from_secs(self.idle_timeout),
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Store: {} (collection: {})", self.db_path, self.collection_name);
        tracing::info!(
            "  Timeouts: read {}s, write {}s, idle {}s",
            self.read_timeout,
            self.write_timeout,
            self.idle_timeout
        );
        tracing::info!("  Short ID length: {} bytes", self.id_length_bytes);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
