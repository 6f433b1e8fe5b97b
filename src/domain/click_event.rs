//! Raw click event model handed from HTTP handlers to the enrichment worker.

use std::net::IpAddr;

/// An unenriched click event captured on the redirect hot path.
///
/// Carries only what the handler can read from the request without blocking:
/// the short code, the peer address and the relevant headers. The enrichment
/// worker derives everything else (device classification, geolocation) off
/// the request path.
///
/// # Usage Flow
///
/// 1. Created in the redirect handler with request metadata
/// 2. Sent to a bounded channel with `try_send`; a full queue drops the event
/// 3. Processed by [`crate::domain::click_worker`]
/// 4. Converted to [`crate::domain::entities::NewClick`] for persistence
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub peer_addr: Option<IpAddr>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub forwarded_for: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event.
    pub fn new(
        code: String,
        peer_addr: Option<IpAddr>,
        user_agent: Option<&str>,
        referer: Option<&str>,
        forwarded_for: Option<&str>,
    ) -> Self {
        Self {
            code,
            peer_addr,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
            forwarded_for: forwarded_for.map(|s| s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation_full() {
        let event = ClickEvent::new(
            "abc12345".to_string(),
            Some("192.168.1.1".parse().unwrap()),
            Some("Mozilla/5.0"),
            Some("https://google.com"),
            Some("203.0.113.7, 10.0.0.1"),
        );

        assert_eq!(event.code, "abc12345");
        assert_eq!(event.peer_addr, Some("192.168.1.1".parse().unwrap()));
        assert_eq!(event.user_agent, Some("Mozilla/5.0".to_string()));
        assert_eq!(event.referer, Some("https://google.com".to_string()));
        assert_eq!(
            event.forwarded_for,
            Some("203.0.113.7, 10.0.0.1".to_string())
        );
    }

    #[test]
    fn test_click_event_creation_minimal() {
        let event = ClickEvent::new("xyz".to_string(), None, None, None, None);

        assert_eq!(event.code, "xyz");
        assert!(event.peer_addr.is_none());
        assert!(event.user_agent.is_none());
        assert!(event.referer.is_none());
        assert!(event.forwarded_for.is_none());
    }
}
