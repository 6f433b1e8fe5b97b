//! Shared application state injected into handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{AnalyticsService, LinkService};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::cache::CacheService;

/// Process-wide handles constructed once at startup.
///
/// Cheap to clone; every field is an `Arc` or a channel sender.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub cache: Arc<dyn CacheService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Public base URL used when rendering short URLs, e.g. `https://s.example.com`.
    pub base_url: String,
}
