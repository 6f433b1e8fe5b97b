//! User-agent classification for click enrichment.
//!
//! Wraps the `woothee` parser behind a single pure function. The parser is
//! treated as a black-box classifier; device type is derived from its
//! category with precedence mobile > tablet > desktop > other.

use crate::domain::entities::DeviceType;
use woothee::parser::Parser;

/// Classification result for a single User-Agent string.
///
/// Unknown fields are `None` rather than the parser's "UNKNOWN" sentinel.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedAgent {
    pub device_type: Option<DeviceType>,
    pub browser_name: Option<String>,
    pub browser_version: Option<String>,
    pub os_name: Option<String>,
    pub os_version: Option<String>,
}

const UNKNOWN: &str = "UNKNOWN";

fn known(value: &str) -> Option<String> {
    if value.is_empty() || value == UNKNOWN {
        None
    } else {
        Some(value.to_string())
    }
}

/// Classifies a User-Agent string into device, browser and OS fields.
///
/// Returns the default (all-`None`) classification when the string is
/// missing or unparseable; the enrichment pipeline then records a
/// partially populated click instead of dropping it.
pub fn classify(user_agent: Option<&str>) -> ClassifiedAgent {
    let Some(ua) = user_agent.filter(|s| !s.trim().is_empty()) else {
        return ClassifiedAgent::default();
    };

    let Some(result) = Parser::new().parse(ua) else {
        return ClassifiedAgent {
            device_type: Some(DeviceType::Other),
            ..ClassifiedAgent::default()
        };
    };

    let device_type = match result.category {
        "smartphone" | "mobilephone" => {
            // woothee lumps tablets into the smartphone category; split them
            // off by the tablet markers carried in the UA string itself.
            if is_tablet_ua(ua) {
                DeviceType::Tablet
            } else {
                DeviceType::Mobile
            }
        }
        "pc" => DeviceType::Desktop,
        _ => DeviceType::Other,
    };

    ClassifiedAgent {
        device_type: Some(device_type),
        browser_name: known(result.name),
        browser_version: known(&result.version),
        os_name: known(result.os),
        os_version: known(&result.os_version),
    }
}

fn is_tablet_ua(ua: &str) -> bool {
    ua.contains("iPad")
        || ua.contains("Tablet")
        || (ua.contains("Android") && !ua.contains("Mobile"))
}
