//! Configuration default values
//!
//! This module contains all the default values for configuration options,
//! making them easily changeable in one central location.

use std::time::Duration;

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

// Resolution service defaults
pub const DEFAULT_RESOLVER_URL: &str = "https://fsmvid.com/api/proxy";
pub const DEFAULT_RESOLVER_TIMEOUT: Duration = Duration::from_secs(9);

// Relay defaults
pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_RELAY_FILENAME: &str = "media.mp4";

// Shared client defaults
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Browser-like header set sent to the resolution service and media hosts.
/// The User-Agent is configured separately.
pub const DEFAULT_BROWSER_HEADERS: &[(&str, &str)] = &[
    ("Authority", "fsmvid.com"),
    ("Accept", "*/*"),
    ("Accept-Language", "en-US,en;q=0.9,id;q=0.8"),
    ("Origin", "https://fsmvid.com"),
    ("Referer", "https://fsmvid.com/"),
];
