//! Upstream Resolver Client
//!
//! Sends one link to the media resolution service and turns its answer into
//! a normalized [`DownloadResult`]. One POST per call, no retry.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::UpstreamConfig;
use crate::errors::{UpstreamError, UpstreamResult};
use crate::models::{DownloadResult, ResolutionRequest, ResolverManifest};
use crate::services::{manifest_normalizer, platform_classifier};

/// Title handed to the normalizer when upstream sends none
const UNTITLED: &str = "video_download";

const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Clone)]
pub struct ResolverClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl ResolverClient {
    pub fn new(client: Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            endpoint: config.resolver_url.clone(),
            timeout: config.resolver_timeout,
        }
    }

    /// Classify `url`, ask the resolution service for its manifest and
    /// normalize the answer.
    pub async fn resolve(&self, url: &str) -> UpstreamResult<DownloadResult> {
        let platform = platform_classifier::classify(url);
        let request = ResolutionRequest::new(url, platform);
        debug!("Resolving {} as {} via {}", url, platform, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, &self.endpoint, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Resolver answered {} for {}", status, url);
            return Err(UpstreamError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, &self.endpoint, self.timeout))?;
        let manifest = parse_manifest(&body)?;

        let title = manifest
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED);
        let medias = manifest.medias.as_deref().unwrap_or_default();

        let result = manifest_normalizer::normalize(title, medias, platform)
            .with_thumbnail(manifest.thumbnail.clone().unwrap_or_default());

        info!(
            "Resolved {} ({}) into {} downloads",
            url,
            platform,
            result.downloads.len()
        );
        Ok(result)
    }
}

/// Decode a resolver body.
///
/// Anything that is not a JSON object reporting `status: "success"` is a
/// rejection; a successful envelope that does not decode is invalid.
fn parse_manifest(body: &[u8]) -> UpstreamResult<ResolverManifest> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            debug!("Resolver body is not JSON: {}", e);
            return Err(UpstreamError::Rejected {
                status: "<non-json body>".to_string(),
            });
        }
    };

    match value.get("status") {
        Some(Value::String(status)) if status == SUCCESS_STATUS => {}
        Some(Value::String(status)) => {
            return Err(UpstreamError::Rejected {
                status: status.clone(),
            })
        }
        Some(other) => {
            return Err(UpstreamError::Rejected {
                status: other.to_string(),
            })
        }
        None => {
            return Err(UpstreamError::Rejected {
                status: "<missing>".to_string(),
            })
        }
    }

    Ok(serde_json::from_value(value)?)
}
