//! DTO for the liveness endpoint.

use serde::Serialize;

/// Liveness response body: `{"status": "OK"}`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "OK" }
    }
}
