//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching short code to long URL mappings.
///
/// Implementations must be thread-safe and fail open: the cache is never
/// the sole source of truth, so errors degrade to database lookups rather
/// than disrupting the request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the long URL for a short code from cache.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a URL mapping in cache with optional TTL.
    ///
    /// `ttl_seconds = None` applies the implementation default (24 hours
    /// from write). Implementations log errors and return `Ok(())` to avoid
    /// disrupting the request flow.
    async fn set_url(
        &self,
        short_code: &str,
        long_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;
}
