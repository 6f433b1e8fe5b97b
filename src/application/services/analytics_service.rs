//! Analytics summary read path.

use std::sync::Arc;

use crate::domain::repositories::{AnalyticsRepository, AnalyticsSummary, LinkRepository};
use crate::error::AppError;
use serde_json::json;

/// Service exposing the summarized click analytics for a short code.
pub struct AnalyticsService {
    link_repository: Arc<dyn LinkRepository>,
    analytics_repository: Arc<dyn AnalyticsRepository>,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        analytics_repository: Arc<dyn AnalyticsRepository>,
    ) -> Self {
        Self {
            link_repository,
            analytics_repository,
        }
    }

    /// Returns the analytics summary for a short code.
    ///
    /// A code with no recorded clicks yields the zero-valued summary; only
    /// an unknown code is an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist and
    /// [`AppError::Internal`] on aggregation query failure.
    pub async fn get_summary(&self, code: &str) -> Result<AnalyticsSummary, AppError> {
        if !self.link_repository.exists(code).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        self.analytics_repository.summarize(code).await
    }
}
