//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link.
///
/// Represents the mapping between a short code and a long URL. Links are
/// immutable after creation and are never deleted by the service.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            long_url,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
}
