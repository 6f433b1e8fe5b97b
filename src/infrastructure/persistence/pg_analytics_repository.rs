//! PostgreSQL implementation of the analytics repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::NewClick;
use crate::domain::repositories::{
    AnalyticsRepository, AnalyticsSummary, LocationCount, ReferrerCount,
};
use crate::error::AppError;

/// Maximum number of referrer rows returned in a summary.
const REFERRER_LIMIT: i64 = 10;
/// Maximum number of location rows returned in a summary.
const LOCATION_LIMIT: i64 = 50;

/// PostgreSQL repository for the append-only click log and its
/// aggregation queries.
pub struct PgAnalyticsRepository {
    pool: Arc<PgPool>,
}

impl PgAnalyticsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO link_clicks (
                short_code, clicked_at, ip_address, referrer,
                device_type, browser_name, browser_version, os_name, os_version,
                country, city, postal_code, timezone, latitude, longitude,
                isp, asn, organization
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(&new_click.short_code)
        .bind(new_click.clicked_at)
        .bind(&new_click.ip_address)
        .bind(&new_click.referrer)
        .bind(new_click.device_type.as_str())
        .bind(&new_click.browser_name)
        .bind(&new_click.browser_version)
        .bind(&new_click.os_name)
        .bind(&new_click.os_version)
        .bind(&new_click.country)
        .bind(&new_click.city)
        .bind(&new_click.postal_code)
        .bind(&new_click.timezone)
        .bind(new_click.latitude)
        .bind(new_click.longitude)
        .bind(&new_click.isp)
        .bind(&new_click.asn)
        .bind(&new_click.organization)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn summarize(&self, code: &str) -> Result<AnalyticsSummary, AppError> {
        let (total_clicks, unique_visitors) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*), COUNT(DISTINCT ip_address)
            FROM link_clicks
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await?;

        let top_country = sqlx::query_scalar::<_, String>(
            r#"
            SELECT country
            FROM link_clicks
            WHERE short_code = $1 AND country IS NOT NULL
            GROUP BY country
            ORDER BY COUNT(*) DESC
            LIMIT 1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let referrers = sqlx::query_as::<_, (Option<String>, i64)>(
            r#"
            SELECT referrer, COUNT(*)
            FROM link_clicks
            WHERE short_code = $1
            GROUP BY referrer
            ORDER BY COUNT(*) DESC
            LIMIT $2
            "#,
        )
        .bind(code)
        .bind(REFERRER_LIMIT)
        .fetch_all(self.pool.as_ref())
        .await?
        .into_iter()
        .map(|(referrer, count)| ReferrerCount { referrer, count })
        .collect();

        let locations = sqlx::query_as::<_, (Option<String>, Option<String>, Option<f64>, Option<f64>, i64)>(
            r#"
            SELECT country, city, AVG(latitude), AVG(longitude), COUNT(*)
            FROM link_clicks
            WHERE short_code = $1 AND country IS NOT NULL
            GROUP BY country, city
            ORDER BY COUNT(*) DESC
            LIMIT $2
            "#,
        )
        .bind(code)
        .bind(LOCATION_LIMIT)
        .fetch_all(self.pool.as_ref())
        .await?
        .into_iter()
        .map(|(country, city, latitude, longitude, count)| LocationCount {
            country,
            city,
            latitude,
            longitude,
            count,
        })
        .collect();

        Ok(AnalyticsSummary {
            total_clicks,
            unique_visitors,
            top_country,
            referrers,
            locations,
        })
    }
}
