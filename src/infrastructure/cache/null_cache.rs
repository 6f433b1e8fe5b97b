//! Disabled-cache fallback.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use tracing::debug;

/// Cache implementation that stores nothing.
///
/// Installed when no Redis URL is configured or the connection fails at
/// startup. Every read misses, so resolution always goes to the store.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Caching disabled");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_url(&self, _short_code: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_url(
        &self,
        _short_code: &str,
        _long_url: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }
}
