//! HTTP geo/ISP provider querying an external JSON API (ipinfo-style).

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{trace, warn};
use ureq::Agent;

use super::provider::{GeoInfo, GeoIpLookup};

/// Geo/ISP provider backed by an external HTTP JSON API.
///
/// The URL template uses `{ip}` as placeholder, e.g.
/// `https://ipinfo.io/{ip}/json`. Requests run on the blocking thread pool
/// with an explicit timeout so a slow provider cannot accumulate unbounded
/// outstanding tasks.
pub struct HttpGeoProvider {
    api_url_template: String,
    agent: Agent,
}

impl HttpGeoProvider {
    /// Creates a provider with the given URL template and request timeout.
    pub fn new(api_url_template: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout(timeout)
            .build();

        Self {
            api_url_template: api_url_template.to_string(),
            agent,
        }
    }

    fn fetch_sync(agent: Agent, url: String) -> Option<GeoInfo> {
        let resp = match agent.get(&url).call() {
            Ok(r) => r,
            Err(e) => {
                warn!("Geo lookup request to \"{}\" failed: {}", url, e);
                return None;
            }
        };

        let json: serde_json::Value = match resp.into_json() {
            Ok(j) => j,
            Err(e) => {
                warn!("Geo lookup response from \"{}\" parse failed: {}", url, e);
                return None;
            }
        };

        Some(parse_response(&json))
    }
}

#[async_trait]
impl GeoIpLookup for HttpGeoProvider {
    async fn lookup(&self, ip: IpAddr) -> Option<GeoInfo> {
        let url = self.api_url_template.replace("{ip}", &ip.to_string());
        let agent = self.agent.clone();

        // The HTTP client is synchronous; run it on the blocking pool.
        tokio::task::spawn_blocking(move || Self::fetch_sync(agent, url))
            .await
            .unwrap_or_else(|e| {
                warn!("Geo lookup task failed: {}", e);
                None
            })
    }

    fn name(&self) -> &'static str {
        "HttpGeoProvider"
    }
}

/// Parses an ipinfo-style JSON body into a [`GeoInfo`].
///
/// Missing or malformed fields stay `None`. The `loc` field is a
/// `"lat,long"` string split into two floats; `org` of shape
/// `"AS15169 Google LLC"` is split into ASN and organization name.
fn parse_response(json: &serde_json::Value) -> GeoInfo {
    let field = |name: &str| json[name].as_str().map(String::from);

    let (latitude, longitude) = json["loc"]
        .as_str()
        .and_then(parse_coordinates)
        .map_or((None, None), |(lat, lon)| (Some(lat), Some(lon)));

    let (asn, organization) = json["org"]
        .as_str()
        .map_or((None, None), split_asn_and_org);

    let info = GeoInfo {
        country: field("country"),
        city: field("city"),
        postal_code: field("postal"),
        timezone: field("timezone"),
        latitude,
        longitude,
        isp: organization.clone(),
        asn,
        organization,
    };

    trace!("Geo lookup result: {:?}", info);
    info
}

fn parse_coordinates(loc: &str) -> Option<(f64, f64)> {
    let (lat, lon) = loc.split_once(',')?;
    Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}

/// Splits `"AS15169 Google LLC"` into `(Some("AS15169"), Some("Google LLC"))`.
/// A value without an AS prefix becomes the organization alone.
fn split_asn_and_org(org: &str) -> (Option<String>, Option<String>) {
    if let Some((first, rest)) = org.split_once(' ') {
        if first.starts_with("AS") && first[2..].chars().all(|c| c.is_ascii_digit()) {
            return (Some(first.to_string()), Some(rest.trim().to_string()));
        }
    }

    let trimmed = org.trim();
    if trimmed.is_empty() {
        (None, None)
    } else {
        (None, Some(trimmed.to_string()))
    }
}
