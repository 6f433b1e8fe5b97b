//! Client IP resolution for the enrichment pipeline.

use std::net::IpAddr;

/// Resolves the effective client IP for a click event.
///
/// Prefers the first entry of an `X-Forwarded-For` header (comma-separated,
/// whitespace-trimmed) and falls back to the direct peer address. An entry
/// that does not parse as an IP address is ignored in favor of the peer.
pub fn resolve_client_ip(forwarded_for: Option<&str>, peer_addr: Option<IpAddr>) -> Option<IpAddr> {
    forwarded_for
        .and_then(|header| header.split(',').next())
        .and_then(|entry| entry.trim().parse::<IpAddr>().ok())
        .or(peer_addr)
}

/// Returns true for addresses that an external geo provider cannot resolve:
/// loopback, unspecified and RFC 1918 / unique-local ranges.
pub fn is_internal(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback() || v4.is_unspecified() || v4.is_private() || v4.is_link_local()
        }
        IpAddr::V6(v6) => {
            v6.is_loopback() || v6.is_unspecified() || (v6.segments()[0] & 0xfe00) == 0xfc00
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_for_first_entry_wins() {
        let ip = resolve_client_ip(
            Some("203.0.113.7, 70.41.3.18, 150.172.238.178"),
            Some("10.0.0.1".parse().unwrap()),
        );
        assert_eq!(ip, Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn test_forwarded_for_trims_whitespace() {
        let ip = resolve_client_ip(Some("  203.0.113.7  "), None);
        assert_eq!(ip, Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn test_falls_back_to_peer_address() {
        let peer: IpAddr = "192.0.2.10".parse().unwrap();
        assert_eq!(resolve_client_ip(None, Some(peer)), Some(peer));
    }

    #[test]
    fn test_garbage_forwarded_for_falls_back_to_peer() {
        let peer: IpAddr = "192.0.2.10".parse().unwrap();
        assert_eq!(resolve_client_ip(Some("unknown"), Some(peer)), Some(peer));
    }

    #[test]
    fn test_no_ip_available() {
        assert_eq!(resolve_client_ip(None, None), None);
    }

    #[test]
    fn test_internal_addresses() {
        assert!(is_internal("127.0.0.1".parse().unwrap()));
        assert!(is_internal("0.0.0.0".parse().unwrap()));
        assert!(is_internal("10.1.2.3".parse().unwrap()));
        assert!(is_internal("192.168.0.1".parse().unwrap()));
        assert!(is_internal("172.16.5.4".parse().unwrap()));
        assert!(is_internal("::1".parse().unwrap()));
        assert!(!is_internal("8.8.8.8".parse().unwrap()));
        assert!(!is_internal("2001:4860:4860::8888".parse().unwrap()));
    }
}
