//! Geo/ISP lookup collaborator.
//!
//! The enrichment worker resolves click geolocation through the
//! [`GeoIpLookup`] trait; [`HttpGeoProvider`] queries an external JSON API.

mod http_provider;
mod provider;

pub use http_provider::HttpGeoProvider;
pub use provider::{GeoInfo, GeoIpLookup};

#[cfg(test)]
pub use provider::MockGeoIpLookup;
