//! Geo/ISP lookup trait and result type.

use async_trait::async_trait;
use std::net::IpAddr;

/// Fully-typed result of a geo/ISP lookup.
///
/// Every field is nullable: a partial provider response populates what it
/// can and the rest stays `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoInfo {
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

/// Trait for IP geolocation/ISP providers.
///
/// A failed or empty lookup returns `None`; the enrichment pipeline then
/// records the click with null geo fields rather than dropping it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoIpLookup: Send + Sync {
    /// Looks up geolocation and network-operator data for an IP address.
    async fn lookup(&self, ip: IpAddr) -> Option<GeoInfo>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
