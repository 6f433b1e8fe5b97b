//! Redis-backed resolution cache.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

const KEY_PREFIX: &str = "url:";

/// Resolution cache over Redis.
///
/// Holds a `ConnectionManager`, which reconnects on its own; every clone
/// shares the underlying connection. Read and write failures are logged
/// and reported as a miss or a no-op, so a dead Redis only costs the
/// store round-trip.
pub struct RedisCache {
    conn: ConnectionManager,
    default_ttl: u64,
}

impl RedisCache {
    /// Connects to Redis and verifies the connection with a PING.
    ///
    /// `default_ttl_seconds` bounds how long a cached mapping is served
    /// without consulting the store.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] when the URL is invalid,
    /// the connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        redis::cmd("PING")
            .query_async::<()>(&mut conn.clone())
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            conn,
            default_ttl: default_ttl_seconds,
        })
    }

    fn key_for(short_code: &str) -> String {
        format!("{KEY_PREFIX}{short_code}")
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<String>>(Self::key_for(short_code)).await {
            Ok(hit) => {
                debug!(
                    "Cache {} for {}",
                    if hit.is_some() { "HIT" } else { "MISS" },
                    short_code
                );
                Ok(hit)
            }
            Err(e) => {
                // Fail open: a Redis error degrades to a miss
                error!("Redis GET error for {}: {}", short_code, e);
                Ok(None)
            }
        }
    }

    async fn set_url(
        &self,
        short_code: &str,
        long_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        if let Err(e) = conn
            .set_ex::<_, _, ()>(Self::key_for(short_code), long_url, ttl)
            .await
        {
            warn!("Redis SET error for {}: {}", short_code, e);
        } else {
            debug!("Cached {} for {}s", short_code, ttl);
        }

        Ok(())
    }
}
