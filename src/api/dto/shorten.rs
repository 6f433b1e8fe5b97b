//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};

/// Request to shorten a URL.
///
/// `long_url` is optional at the serde level so a missing field surfaces
/// as a 400 validation error rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub long_url: Option<String>,
    pub custom_alias: Option<String>,
}

/// Response for a successfully shortened URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub code: String,
}
