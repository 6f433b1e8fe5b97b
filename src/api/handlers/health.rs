//! Handler for the liveness endpoint.

use axum::Json;

use crate::api::dto::health::StatusResponse;

/// Reports process liveness.
///
/// # Endpoint
///
/// `GET /`
pub async fn health_handler() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}
