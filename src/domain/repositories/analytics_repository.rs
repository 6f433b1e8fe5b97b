//! Repository trait for click recording and analytics aggregation.

use crate::domain::entities::NewClick;
use crate::error::AppError;
use async_trait::async_trait;

/// Number of clicks attributed to a single referrer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferrerCount {
    /// `None` groups direct traffic (no Referer header).
    pub referrer: Option<String>,
    pub count: i64,
}

/// Number of clicks attributed to a single geographic location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCount {
    pub country: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub count: i64,
}

/// Summarized click analytics for one short code.
///
/// Derived on demand from the click log; never stored. A code with no
/// recorded clicks yields the zero-valued summary, not an error.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsSummary {
    pub total_clicks: i64,
    pub unique_visitors: i64,
    pub top_country: Option<String>,
    pub referrers: Vec<ReferrerCount>,
    pub locations: Vec<LocationCount>,
}

/// Repository interface for the append-only click log.
///
/// The store must tolerate concurrent independent appends; no ordering is
/// guaranteed between events produced by concurrent redirects.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAnalyticsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Appends a click event to the log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, new_click: NewClick) -> Result<(), AppError>;

    /// Computes the analytics summary for a short code.
    ///
    /// `unique_visitors` counts distinct IP addresses; `top_country` is the
    /// mode of non-null countries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on aggregation query failure.
    async fn summarize(&self, code: &str) -> Result<AnalyticsSummary, AppError>;
}
