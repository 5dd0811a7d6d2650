//! Maps an input link to the platform label the resolution service expects.
//!
//! Matching is plain case-sensitive substring inspection in a fixed priority
//! order. No parsing or reachability check happens here, so any input,
//! including an empty string, gets a label. Links that match nothing are
//! labelled youtube.

use crate::models::Platform;

/// Substring rules checked in order; the first hit wins
const PLATFORM_RULES: &[(&[&str], Platform)] = &[
    (&["facebook", "fb.watch"], Platform::Facebook),
    (&["tiktok"], Platform::Tiktok),
    (&["instagram"], Platform::Instagram),
    (&["twitter", "x.com"], Platform::Twitter),
];

pub fn classify(url: &str) -> Platform {
    PLATFORM_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| url.contains(needle)))
        .map(|(_, platform)| *platform)
        .unwrap_or(Platform::Youtube)
}
