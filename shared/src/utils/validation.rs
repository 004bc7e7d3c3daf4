//! Validation helpers for session client metadata

use std::net::IpAddr;

/// Maximum stored length for a device description
pub const MAX_DEVICE_LENGTH: usize = 128;

/// Maximum stored length for a user agent string
pub const MAX_USER_AGENT_LENGTH: usize = 512;

/// Check whether a string is a valid IPv4 or IPv6 literal
pub fn is_valid_ip(value: &str) -> bool {
    value.parse::<IpAddr>().is_ok()
}

/// Cap a string at `max` characters, truncating on a char boundary
pub fn cap_length(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        value.chars().take(max).collect()
    }
}
