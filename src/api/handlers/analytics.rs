//! Handler for the analytics summary endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::analytics::AnalyticsSummaryResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the summarized click analytics for a short code.
///
/// # Endpoint
///
/// `GET /api/analytics/{code}`
///
/// A known code with zero recorded clicks returns the zero-valued summary
/// with 200, not an error.
///
/// # Errors
///
/// Returns 404 for an unknown code and 500 on aggregation failure.
pub async fn analytics_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AnalyticsSummaryResponse>, AppError> {
    let summary = state.analytics_service.get_summary(&code).await?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::state_with;
    use crate::domain::repositories::{
        AnalyticsSummary, MockAnalyticsRepository, MockLinkRepository, ReferrerCount,
    };
    use crate::infrastructure::cache::NullCache;
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use std::sync::Arc;

    fn server(
        link_repo: MockLinkRepository,
        analytics_repo: MockAnalyticsRepository,
    ) -> TestServer {
        let (state, _rx) = state_with(link_repo, analytics_repo, Arc::new(NullCache));
        let app = Router::new()
            .route("/api/analytics/{code}", get(analytics_handler))
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_analytics_unknown_code() {
        let mut link_repo = MockLinkRepository::new();
        link_repo.expect_exists().times(1).returning(|_| Ok(false));

        let server = server(link_repo, MockAnalyticsRepository::new());

        let response = server.get("/api/analytics/missing1").await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_analytics_zero_clicks_is_valid_summary() {
        let mut link_repo = MockLinkRepository::new();
        link_repo.expect_exists().returning(|_| Ok(true));

        let mut analytics_repo = MockAnalyticsRepository::new();
        analytics_repo
            .expect_summarize()
            .returning(|_| Ok(AnalyticsSummary::default()));

        let server = server(link_repo, analytics_repo);

        let response = server.get("/api/analytics/abc12345").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["total_clicks"], 0);
        assert_eq!(body["unique_visitors"], 0);
        assert!(body["top_country"].is_null());
        assert_eq!(body["referrers"].as_array().unwrap().len(), 0);
        assert_eq!(body["locations"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_analytics_aggregation_failure_is_500() {
        let mut link_repo = MockLinkRepository::new();
        link_repo.expect_exists().returning(|_| Ok(true));

        let mut analytics_repo = MockAnalyticsRepository::new();
        analytics_repo.expect_summarize().returning(|_| {
            Err(crate::error::AppError::internal(
                "Database error",
                serde_json::json!({}),
            ))
        });

        let server = server(link_repo, analytics_repo);

        let response = server.get("/api/analytics/abc12345").await;
        response.assert_status_internal_server_error();
    }

    #[tokio::test]
    async fn test_analytics_populated_summary() {
        let mut link_repo = MockLinkRepository::new();
        link_repo.expect_exists().returning(|_| Ok(true));

        let mut analytics_repo = MockAnalyticsRepository::new();
        analytics_repo.expect_summarize().returning(|_| {
            Ok(AnalyticsSummary {
                total_clicks: 4,
                unique_visitors: 2,
                top_country: Some("US".to_string()),
                referrers: vec![ReferrerCount {
                    referrer: None,
                    count: 4,
                }],
                locations: vec![],
            })
        });

        let server = server(link_repo, analytics_repo);

        let response = server.get("/api/analytics/abc12345").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["total_clicks"], 4);
        assert_eq!(body["top_country"], "US");
        assert!(body["referrers"][0]["referrer"].is_null());
        assert_eq!(body["referrers"][0]["count"], 4);
    }
}
