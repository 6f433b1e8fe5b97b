//! Handler for the link shortening endpoint.

use axum::{Json, extract::State};
use serde_json::json;
use tracing::error;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com/page", "custom_alias": "promo" }
/// ```
///
/// # Errors
///
/// Returns 400 for a missing or scheme-invalid `long_url` and 409 when the
/// custom alias is already bound.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    let long_url = payload.long_url.ok_or_else(|| {
        AppError::bad_request("Missing 'long_url' in request", json!({ "field": "long_url" }))
    })?;

    let link = state
        .link_service
        .create_short_link(long_url, payload.custom_alias)
        .await?;

    // Write-through: populate the cache at creation time
    if let Err(e) = state
        .cache
        .set_url(&link.code, &link.long_url, None)
        .await
    {
        error!("Failed to cache new link {}: {}", link.code, e);
    }

    let short_url = state.link_service.get_short_url(&state.base_url, &link.code);

    Ok(Json(ShortenResponse {
        short_url,
        code: link.code,
    }))
}
