use serde::{Deserialize, Serialize};

use super::serde_helpers::{opt_bool, opt_byte_count, opt_string};
use super::Platform;

/// Body sent to the resolution service
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionRequest {
    pub url: String,
    pub platform: Platform,
    #[serde(rename = "isHomepage")]
    pub is_homepage: bool,
}

impl ResolutionRequest {
    pub fn new(url: impl Into<String>, platform: Platform) -> Self {
        Self {
            url: url.into(),
            platform,
            is_homepage: true,
        }
    }
}

/// Envelope returned by the resolution service
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolverManifest {
    #[serde(default, deserialize_with = "opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub medias: Option<Vec<RawMedia>>,
}

/// One downloadable variant as reported upstream
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMedia {
    #[serde(default, deserialize_with = "opt_string")]
    pub extension: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "opt_string")]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub quality: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub url: Option<String>,
    #[serde(rename = "contentLength", default, deserialize_with = "opt_byte_count")]
    pub content_length: Option<u64>,
    #[serde(default, deserialize_with = "opt_bool")]
    pub audio_available: Option<bool>,
    #[serde(default, deserialize_with = "opt_bool")]
    pub is_audio: Option<bool>,
}

impl RawMedia {
    pub fn is_audio_track(&self) -> bool {
        self.media_type.as_deref() == Some("audio")
    }

    /// Youtube heuristic: a video carries sound unless upstream explicitly
    /// says otherwise through either flag.
    pub fn has_sound(&self) -> bool {
        self.audio_available != Some(false) && self.is_audio != Some(false)
    }
}

/// Client-facing description of one downloadable variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMedia {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub ext: String,
    pub filename: String,
    pub size: String,
}

/// Normalized manifest returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResult {
    pub title: String,
    pub thumbnail: String,
    pub platform: Platform,
    pub downloads: Vec<NormalizedMedia>,
}

impl DownloadResult {
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }
}
