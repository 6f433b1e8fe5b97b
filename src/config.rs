//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required Variables
//!
//! Either `DATABASE_URL` or all of (`DB_HOST`, `DB_USER`, `DB_PASSWORD`,
//! `DB_NAME`)
//!
//! ## Optional Variables
//!
//! - `REDIS_URL` / `REDIS_HOST` - Redis connection (enables caching if set)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public base for rendered short URLs
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CACHE_TTL_SECONDS` - Cached mapping lifetime (default: 86400)
//! - `CLICK_QUEUE_CAPACITY` - Click event buffer size (default: 10000)
//! - `CLICK_WORKER_CONCURRENCY` - In-flight enrichment bound (default: 4)
//! - `GEOIP_URL` - Geo provider URL template with `{ip}` placeholder
//! - `GEOIP_TIMEOUT_MS` - Geo lookup timeout (default: 2000)

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub listen_addr: String,
    /// Public base URL used when rendering short URLs.
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    /// Lifetime of cached code -> URL mappings, in seconds.
    pub cache_ttl_seconds: u64,
    /// Capacity of the bounded click event channel.
    pub click_queue_capacity: usize,
    /// Maximum number of click events enriched concurrently.
    pub click_worker_concurrency: usize,
    /// Geo provider URL template with an `{ip}` placeholder.
    pub geoip_url: String,
    /// Timeout for a single geo lookup request, in milliseconds.
    pub geoip_timeout_ms: u64,
    /// Maximum number of connections in the database pool.
    pub db_max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required database configuration is missing.
    pub fn from_env() -> Result<Self> {
        let database_url =
            Self::load_database_url().context("Failed to load database configuration")?;

        let redis_url = Self::load_redis_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url = env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let cache_ttl_seconds = env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let click_queue_capacity = env::var("CLICK_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000);

        let click_worker_concurrency = env::var("CLICK_WORKER_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        let geoip_url =
            env::var("GEOIP_URL").unwrap_or_else(|_| "https://ipinfo.io/{ip}/json".to_string());

        let geoip_timeout_ms = env::var("GEOIP_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2_000);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            database_url,
            redis_url,
            listen_addr,
            base_url,
            log_level,
            log_format,
            cache_ttl_seconds,
            click_queue_capacity,
            click_worker_concurrency,
            geoip_url,
            geoip_timeout_ms,
            db_max_connections,
        })
    }

    /// Loads database URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `DATABASE_URL` environment variable
    /// 2. Constructed from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`
    fn load_database_url() -> Result<String> {
        if let Ok(url) = env::var("DATABASE_URL") {
            return Ok(url);
        }

        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let user =
            env::var("DB_USER").context("DB_USER must be set when DATABASE_URL is not provided")?;
        let password = env::var("DB_PASSWORD")
            .context("DB_PASSWORD must be set when DATABASE_URL is not provided")?;
        let name =
            env::var("DB_NAME").context("DB_NAME must be set when DATABASE_URL is not provided")?;

        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, host, port, name
        ))
    }

    /// Validates the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any setting is out of its accepted range.
    pub fn validate(&self) -> Result<()> {
        if self.click_queue_capacity < 100 {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY must be at least 100, got {}",
                self.click_queue_capacity
            );
        }

        if self.click_worker_concurrency == 0 || self.click_worker_concurrency > 256 {
            anyhow::bail!(
                "CLICK_WORKER_CONCURRENCY must be between 1 and 256, got {}",
                self.click_worker_concurrency
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

        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            anyhow::bail!("DATABASE_URL must start with 'postgres://' or 'postgresql://'");
        }

        if let Some(ref redis_url) = self.redis_url {
            if !redis_url.starts_with("redis://") && !redis_url.starts_with("rediss://") {
                anyhow::bail!("REDIS_URL must start with 'redis://' or 'rediss://'");
            }
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than 0");
        }

        if !self.geoip_url.contains("{ip}") {
            anyhow::bail!(
                "GEOIP_URL must contain an '{{ip}}' placeholder, got '{}'",
                self.geoip_url
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        Ok(())
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Returns `None` if Redis is not configured; the server then runs with
    /// caching disabled.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        match env::var("REDIS_PASSWORD") {
            Ok(password) if !password.is_empty() => {
                Some(format!("redis://:{}@{}:{}/{}", password, host, port, db))
            }
            _ => Some(format!("redis://{}:{}/{}", host, port, db)),
        }
    }
}

/// Loads and validates configuration from environment variables.
///
/// Expects the environment to be populated already (e.g. via
/// `dotenvy::dotenv()` in `main`).
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            database_url: "postgres://localhost/snaplink".to_string(),
            redis_url: None,
            listen_addr: "0.0.0.0:3000".to_string(),
            base_url: "http://localhost:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            cache_ttl_seconds: 86_400,
            click_queue_capacity: 10_000,
            click_worker_concurrency: 4,
            geoip_url: "https://ipinfo.io/{ip}/json".to_string(),
            geoip_timeout_ms: 2_000,
            db_max_connections: 10,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_click_queue() {
        let mut config = valid_config();
        config.click_queue_capacity = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let mut config = valid_config();
        config.log_format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_geoip_url_without_placeholder() {
        let mut config = valid_config();
        config.geoip_url = "https://ipinfo.io/json".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_cache_ttl() {
        let mut config = valid_config();
        config.cache_ttl_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_foreign_database_scheme() {
        let mut config = valid_config();
        config.database_url = "mysql://localhost/snaplink".to_string();
        assert!(config.validate().is_err());
    }
}
