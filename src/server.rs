//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, worker spawning, and Axum
//! server lifecycle.

use crate::application::services::{AnalyticsService, LinkService};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::geoip::{GeoIpLookup, HttpGeoProvider};
use crate::infrastructure::persistence::{PgAnalyticsRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes, in order: the PostgreSQL pool, migrations, the Redis cache
/// (or NullCache fallback), the background enrichment worker and the Axum
/// server. Shuts down on ctrl-c; in-flight enrichment tasks are abandoned
/// with the runtime (best-effort telemetry).
///
/// # Errors
///
/// Returns an error if the database connection, migration, bind or server
/// runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let pool = Arc::new(pool);
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let analytics_repository = Arc::new(PgAnalyticsRepository::new(pool.clone()));

    let geoip: Arc<dyn GeoIpLookup> = Arc::new(HttpGeoProvider::new(
        &config.geoip_url,
        Duration::from_millis(config.geoip_timeout_ms),
    ));
    tracing::info!("Geo provider: {}", geoip.name());

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(
        click_rx,
        analytics_repository.clone(),
        geoip,
        config.click_worker_concurrency,
    ));
    tracing::info!("Click worker started");

    let state = AppState {
        link_service: Arc::new(LinkService::new(link_repository.clone())),
        analytics_service: Arc::new(AnalyticsService::new(
            link_repository,
            analytics_repository,
        )),
        cache,
        click_sender: click_tx,
        base_url: config.base_url.clone(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
