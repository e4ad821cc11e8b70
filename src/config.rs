//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Variables
//!
//! All variables are optional; defaults match the original deployment:
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `BASE_URL` - Public base used in retrieval handles (default: `http://localhost:8080`)
//! - `CACHE_CAPACITY` - Result cache entry limit (default: 1024)
//! - `MAX_SOURCE_BYTES` - Fetched image size ceiling (default: 15 MiB)
//! - `MAX_REQUEST_BYTES` - Submit request body ceiling (default: 8 KiB)
//! - `FETCH_TIMEOUT_SECS` - Per-fetch HTTP timeout (default: 30)
//! - `POLL_TIMEOUT_SECS` - Retrieval wait bound (default: 5)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Base URL callers use to reach this service; retrieval handles in
    /// submit responses are built from it.
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    /// Maximum number of resized results held in memory; the least recently
    /// used entry is evicted beyond this.
    pub cache_capacity: usize,
    /// Ceiling on a fetched source image body.
    pub max_source_bytes: usize,
    /// Ceiling on an inbound submit request body.
    pub max_request_bytes: usize,
    pub fetch_timeout_secs: u64,
    /// Bound on the retrieval path's wait for an in-flight resize.
    pub poll_timeout_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let cache_capacity = env::var("CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024);

        let max_source_bytes = env::var("MAX_SOURCE_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15 * 1024 * 1024);

        let max_request_bytes = env::var("MAX_REQUEST_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8 * 1024);

        let fetch_timeout_secs = env::var("FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let poll_timeout_secs = env::var("POLL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Self {
            listen_addr,
            base_url,
            log_level,
            log_format,
            cache_capacity,
            max_source_bytes,
            max_request_bytes,
            fetch_timeout_secs,
            poll_timeout_secs,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range or malformed.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            anyhow::bail!("CACHE_CAPACITY must be at least 1");
        }

        if self.cache_capacity > 1_000_000 {
            anyhow::bail!(
                "CACHE_CAPACITY is too large (max: 1000000), got {}",
                self.cache_capacity
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.max_source_bytes == 0 {
            anyhow::bail!("MAX_SOURCE_BYTES must be greater than 0");
        }

        if self.max_request_bytes < 1024 {
            anyhow::bail!(
                "MAX_REQUEST_BYTES must be at least 1024, got {}",
                self.max_request_bytes
            );
        }

        if self.fetch_timeout_secs == 0 {
            anyhow::bail!("FETCH_TIMEOUT_SECS must be greater than 0");
        }

        if self.poll_timeout_secs == 0 {
            anyhow::bail!("POLL_TIMEOUT_SECS must be greater than 0");
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Cache capacity: {} entries", self.cache_capacity);
        tracing::info!("  Max source size: {} bytes", self.max_source_bytes);
        tracing::info!("  Max request size: {} bytes", self.max_request_bytes);
        tracing::info!("  Fetch timeout: {}s", self.fetch_timeout_secs);
        tracing::info!("  Poll timeout: {}s", self.poll_timeout_secs);
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
