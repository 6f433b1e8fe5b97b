//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use tracing::{debug, error};

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Check cache for the long URL
/// 2. On cache miss, query the store; unknown code is 404 and nothing else
///    happens
/// 3. On store hit, backfill the cache asynchronously
/// 4. Enqueue a click event for background enrichment (fire-and-forget:
///    a full queue drops the event)
/// 5. Return 302 Found with the Location header
///
/// The response never waits on analytics; an enrichment failure cannot
/// change the outcome of this call.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = match state.cache.get_url(&code).await {
        Ok(Some(cached_url)) => {
            debug!("Cache HIT for {}", code);
            cached_url
        }
        Ok(None) => {
            debug!("Cache MISS for {}", code);

            let link = state.link_service.get_link_by_code(&code).await?;

            // Backfill the cache off the response path (fire-and-forget)
            let cache = state.cache.clone();
            let cache_code = code.clone();
            let cache_url = link.long_url.clone();
            tokio::spawn(async move {
                if let Err(e) = cache.set_url(&cache_code, &cache_url, None).await {
                    error!("Failed to cache URL: {}", e);
                }
            });

            link.long_url
        }
        Err(e) => {
            error!("Cache error: {}", e);

            // Fall back to the store on cache error
            let link = state.link_service.get_link_by_code(&code).await?;
            link.long_url
        }
    };

    // Schedule click enrichment off the response path
    let click_event = ClickEvent::new(
        code,
        Some(addr.ip()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
        headers.get(X_FORWARDED_FOR).and_then(|v| v.to_str().ok()),
    );

    let _ = state.click_sender.try_send(click_event);

    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::{MockConnectInfoLayer, state_with};
    use crate::domain::entities::Link;
    use crate::domain::repositories::{MockAnalyticsRepository, MockLinkRepository};
    use crate::infrastructure::cache::{MockCacheService, NullCache};
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use chrono::Utc;
    use std::sync::Arc;

    fn router(state: crate::state::AppState) -> Router {
        Router::new()
            .route("/{code}", get(redirect_handler))
            .layer(MockConnectInfoLayer)
            .with_state(state)
    }

    #[tokio::test]
    async fn test_redirect_found_via_store() {
        let mut link_repo = MockLinkRepository::new();
        link_repo
            .expect_find_by_code()
            .withf(|code| code == "abc12345")
            .times(1)
            .returning(|_| {
                Ok(Some(Link::new(
                    "abc12345".to_string(),
                    "https://example.com/target".to_string(),
                    Utc::now(),
                )))
            });

        let (state, mut click_rx) = state_with(
            link_repo,
            MockAnalyticsRepository::new(),
            Arc::new(NullCache),
        );
        let server = TestServer::new(router(state)).unwrap();

        let response = server.get("/abc12345").await;

        assert_eq!(response.status_code(), 302);
        assert_eq!(response.header("location"), "https://example.com/target");

        let event = click_rx.try_recv().unwrap();
        assert_eq!(event.code, "abc12345");
        assert_eq!(event.peer_addr, Some("203.0.113.9".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_redirect_unknown_code_produces_no_click() {
        let mut link_repo = MockLinkRepository::new();
        link_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let (state, mut click_rx) = state_with(
            link_repo,
            MockAnalyticsRepository::new(),
            Arc::new(NullCache),
        );
        let server = TestServer::new(router(state)).unwrap();

        let response = server.get("/missing1").await;

        response.assert_status_not_found();
        assert!(click_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_redirect_cache_hit_skips_store() {
        let mut cache = MockCacheService::new();
        cache
            .expect_get_url()
            .withf(|code| code == "cached12")
            .times(1)
            .returning(|_| Ok(Some("https://example.com/cached".to_string())));

        let mut link_repo = MockLinkRepository::new();
        link_repo.expect_find_by_code().times(0);

        let (state, mut click_rx) =
            state_with(link_repo, MockAnalyticsRepository::new(), Arc::new(cache));
        let server = TestServer::new(router(state)).unwrap();

        let response = server.get("/cached12").await;

        assert_eq!(response.status_code(), 302);
        assert_eq!(response.header("location"), "https://example.com/cached");

        // Analytics is scheduled on cache hits too
        assert_eq!(click_rx.try_recv().unwrap().code, "cached12");
    }

    #[tokio::test]
    async fn test_redirect_captures_headers() {
        let mut link_repo = MockLinkRepository::new();
        link_repo.expect_find_by_code().returning(|_| {
            Ok(Some(Link::new(
                "track123".to_string(),
                "https://example.com".to_string(),
                Utc::now(),
            )))
        });

        let (state, mut click_rx) = state_with(
            link_repo,
            MockAnalyticsRepository::new(),
            Arc::new(NullCache),
        );
        let server = TestServer::new(router(state)).unwrap();

        let response = server
            .get("/track123")
            .add_header("User-Agent", "Mozilla/5.0")
            .add_header("Referer", "https://google.com")
            .add_header("X-Forwarded-For", "198.51.100.4, 10.0.0.1")
            .await;

        assert_eq!(response.status_code(), 302);

        let event = click_rx.try_recv().unwrap();
        assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(event.referer.as_deref(), Some("https://google.com"));
        assert_eq!(
            event.forwarded_for.as_deref(),
            Some("198.51.100.4, 10.0.0.1")
        );
    }
}
