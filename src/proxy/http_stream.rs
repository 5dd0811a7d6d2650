//! HTTP stream relay.
//!
//! Opens a GET against a media URL previously returned by the resolver and
//! pipes the body to the client as it arrives.
//!
//! Key behaviors:
//!   - The relay timeout bounds the wait for the upstream response head only.
//!     Once bytes flow there is no total timeout; large files must finish.
//!   - The body is handed to axum as a stream, so hyper only polls upstream
//!     when the client socket can take more. Nothing is buffered whole.
//!   - Dropping the response (client disconnect) drops the upstream request.
//!   - `Content-Disposition: attachment; filename="<name>"` is always set,
//!     `media.mp4` when no name is supplied.
//!   - Upstream `Content-Type` / `Content-Length` are passed through.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderValue, Response, StatusCode};
use futures::StreamExt;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::defaults::DEFAULT_RELAY_FILENAME;
use crate::config::UpstreamConfig;
use crate::errors::{RelayError, RelayResult};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct RelayStreamer {
    client: Client,
    timeout: Duration,
}

impl RelayStreamer {
    pub fn new(client: Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            timeout: config.relay_timeout,
        }
    }

    /// Relay `media_url` to the client as an attachment named `filename`.
    pub async fn relay(&self, media_url: &str, filename: Option<&str>) -> RelayResult<Response<Body>> {
        let filename = filename
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_RELAY_FILENAME);
        // Validate before touching the network
        let disposition = content_disposition(filename)?;

        info!("Relaying upstream media: {} as {:?}", media_url, filename);

        let upstream = match tokio::time::timeout(self.timeout, self.client.get(media_url).send()).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                warn!("Failed to connect to media host {}: {}", media_url, e);
                return Err(RelayError::Network(e));
            }
            Err(_) => {
                warn!("Media host {} did not answer within {:?}", media_url, self.timeout);
                return Err(RelayError::timeout(media_url, self.timeout));
            }
        };

        let status = upstream.status();
        if !status.is_success() {
            warn!("Media host responded with error status {} for {}", status, media_url);
            return Err(RelayError::Http {
                status: status.as_u16(),
                url: media_url.to_string(),
            });
        }

        let content_type = upstream
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(FALLBACK_CONTENT_TYPE));
        let content_length = upstream.headers().get(header::CONTENT_LENGTH).cloned();

        debug!(
            "Media host accepted: ct={:?} cl={:?} url={}",
            content_type, content_length, media_url
        );

        let source_url = media_url.to_string();
        let byte_stream = upstream.bytes_stream().inspect(move |chunk| {
            if let Err(e) = chunk {
                warn!("Relay of {} aborted mid-stream: {}", source_url, e);
            }
        });

        let mut builder = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_DISPOSITION, disposition);

        if let Some(len) = content_length {
            builder = builder.header(header::CONTENT_LENGTH, len);
        }

        builder
            .body(Body::from_stream(byte_stream))
            .map_err(|e| RelayError::InvalidResponse {
                message: e.to_string(),
            })
    }
}

/// Build the attachment header for `filename`.
///
/// The name is used verbatim inside the quotes; anything a header value
/// cannot carry (control characters, line breaks) is rejected.
pub fn content_disposition(filename: &str) -> RelayResult<HeaderValue> {
    HeaderValue::from_bytes(format!("attachment; filename=\"{filename}\"").as_bytes()).map_err(
        |_| RelayError::InvalidFilename {
            filename: filename.to_string(),
        },
    )
}
