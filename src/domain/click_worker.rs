//! Asynchronous click enrichment worker.
//!
//! Consumes raw [`ClickEvent`]s from a bounded channel, enriches them
//! (client IP, device/browser/OS classification, geolocation) and appends
//! the resulting record to the click log. Runs fully detached from the
//! redirect path: an enrichment failure is logged and swallowed, never
//! surfaced to the visitor.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;
use crate::infrastructure::geoip::GeoIpLookup;
use crate::utils::{client_ip, user_agent};

/// Runs the click worker until the channel closes.
///
/// Enrichment of individual events runs on spawned tasks gated by a
/// semaphore, bounding the number of in-flight geo lookups under load.
/// On shutdown, tasks still in flight are abandoned with the runtime.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    analytics_repository: Arc<dyn AnalyticsRepository>,
    geoip: Arc<dyn GeoIpLookup>,
    concurrency: usize,
) {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let repository = analytics_repository.clone();
        let geoip = geoip.clone();

        tokio::spawn(async move {
            let code = event.code.clone();
            if let Err(e) = process_event(event, repository.as_ref(), geoip.as_ref()).await {
                warn!("Click enrichment for \"{}\" failed: {}", code, e);
            }
            drop(permit);
        });
    }

    debug!("Click worker channel closed, stopping");
}

/// Enriches a single click event and appends it to the click log.
///
/// Classification and geo lookup are best-effort: when either fails the
/// record is inserted with the corresponding fields null. Only a failing
/// append itself returns an error.
pub(crate) async fn process_event(
    event: ClickEvent,
    analytics_repository: &dyn AnalyticsRepository,
    geoip: &dyn GeoIpLookup,
) -> Result<(), AppError> {
    let mut click = NewClick::bare(event.code, Utc::now());

    let ip = client_ip::resolve_client_ip(event.forwarded_for.as_deref(), event.peer_addr);
    click.ip_address = ip.map(|addr| addr.to_string());
    click.referrer = event.referer;

    let agent = user_agent::classify(event.user_agent.as_deref());
    if let Some(device_type) = agent.device_type {
        click.device_type = device_type;
    }
    click.browser_name = agent.browser_name;
    click.browser_version = agent.browser_version;
    click.os_name = agent.os_name;
    click.os_version = agent.os_version;

    if let Some(ip) = ip {
        if client_ip::is_internal(ip) {
            debug!("Skipping geo lookup for internal address {}", ip);
        } else if let Some(geo) = geoip.lookup(ip).await {
            click.country = geo.country;
            click.city = geo.city;
            click.postal_code = geo.postal_code;
            click.timezone = geo.timezone;
            click.latitude = geo.latitude;
            click.longitude = geo.longitude;
            click.isp = geo.isp;
            click.asn = geo.asn;
            click.organization = geo.organization;
        } else {
            debug!("Geo lookup for {} returned nothing", ip);
        }
    }

    analytics_repository.record_click(click).await
}
