//! Click entity representing a single enriched redirect event.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Coarse device classification derived from the User-Agent string.
///
/// Classification precedence is mobile > tablet > desktop > other: the
/// first matching category wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
    Other,
}

impl DeviceType {
    /// Stable lowercase name used for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input data for recording a new click event.
///
/// Produced exclusively by the enrichment worker. All enrichment-derived
/// fields are optional: a partially populated record is preferred over a
/// dropped one when classification or the geo lookup fails.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub short_code: String,
    pub clicked_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub referrer: Option<String>,
    pub device_type: DeviceType,
    pub browser_name: Option<String>,
    pub browser_version: Option<String>,
    pub os_name: Option<String>,
    pub os_version: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub timezone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub isp: Option<String>,
    pub asn: Option<String>,
    pub organization: Option<String>,
}

impl NewClick {
    /// Creates a bare click record with a capture timestamp and no
    /// enrichment data. Enrichment steps fill in the remaining fields.
    pub fn bare(short_code: String, clicked_at: DateTime<Utc>) -> Self {
        Self {
            short_code,
            clicked_at,
            ip_address: None,
            referrer: None,
            device_type: DeviceType::Other,
            browser_name: None,
            browser_version: None,
            os_name: None,
            os_version: None,
            country: None,
            city: None,
            postal_code: None,
            timezone: None,
            latitude: None,
            longitude: None,
            isp: None,
            asn: None,
            organization: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_device_type_as_str() {
        assert_eq!(DeviceType::Mobile.as_str(), "mobile");
        assert_eq!(DeviceType::Tablet.as_str(), "tablet");
        assert_eq!(DeviceType::Desktop.as_str(), "desktop");
        assert_eq!(DeviceType::Other.as_str(), "other");
    }

    #[test]
    fn test_bare_click_has_no_enrichment() {
        let click = NewClick::bare("abc12345".to_string(), Utc::now());

        assert_eq!(click.short_code, "abc12345");
        assert_eq!(click.device_type, DeviceType::Other);
        assert!(click.ip_address.is_none());
        assert!(click.country.is_none());
        assert!(click.latitude.is_none());
        assert!(click.asn.is_none());
    }
}
