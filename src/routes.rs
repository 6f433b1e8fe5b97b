//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                      - Liveness check
//! - `POST /shorten`               - Create a short link
//! - `GET  /api/analytics/{code}`  - Analytics summary
//! - `GET  /{code}`                - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    analytics_handler, health_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

/// Constructs the application router with all routes and middleware.
///
/// The catch-all `/{code}` route is registered last so fixed routes take
/// precedence.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(health_handler))
        .route("/shorten", post(shorten_handler))
        .route("/api/analytics/{code}", get(analytics_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
