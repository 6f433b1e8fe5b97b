//! DTOs for the analytics summary endpoint.

use serde::Serialize;

use crate::domain::repositories::{AnalyticsSummary, LocationCount, ReferrerCount};

/// Serialized analytics summary for one short code.
#[derive(Debug, Serialize)]
pub struct AnalyticsSummaryResponse {
    pub total_clicks: i64,
    pub unique_visitors: i64,
    pub top_country: Option<String>,
    pub referrers: Vec<ReferrerEntry>,
    pub locations: Vec<LocationEntry>,
}

#[derive(Debug, Serialize)]
pub struct ReferrerEntry {
    pub referrer: Option<String>,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct LocationEntry {
    pub country: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub count: i64,
}

impl From<AnalyticsSummary> for AnalyticsSummaryResponse {
    fn from(summary: AnalyticsSummary) -> Self {
        Self {
            total_clicks: summary.total_clicks,
            unique_visitors: summary.unique_visitors,
            top_country: summary.top_country,
            referrers: summary.referrers.into_iter().map(Into::into).collect(),
            locations: summary.locations.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ReferrerCount> for ReferrerEntry {
    fn from(r: ReferrerCount) -> Self {
        Self {
            referrer: r.referrer,
            count: r.count,
        }
    }
}

impl From<LocationCount> for LocationEntry {
    fn from(l: LocationCount) -> Self {
        Self {
            country: l.country,
            city: l.city,
            latitude: l.latitude,
            longitude: l.longitude,
            count: l.count,
        }
    }
}
