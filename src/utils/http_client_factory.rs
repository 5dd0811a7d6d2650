//! HTTP Client Factory
//!
//! Builds the single outbound `reqwest::Client` from an explicit
//! [`UpstreamConfig`]. The client carries the browser-like header set and
//! the connect timeout; per-call timeouts are applied by the resolver and
//! relay, which have different needs.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use tracing::debug;

use crate::config::UpstreamConfig;
use crate::errors::{AppError, AppResult};

/// Factory for the outbound HTTP client shared by all collaborators
#[derive(Debug, Clone)]
pub struct HttpClientFactory {
    config: UpstreamConfig,
}

impl HttpClientFactory {
    pub fn new(config: UpstreamConfig) -> Self {
        Self { config }
    }

    /// Create the client. It has no total request timeout;
    /// relayed downloads must be able to run for as long as the body lasts.
    pub fn create_client(&self) -> AppResult<Client> {
        let headers = self.default_headers()?;
        debug!(
            "Building upstream HTTP client with {} default headers, connect timeout {:?}",
            headers.len(),
            self.config.connect_timeout
        );

        Client::builder()
            .user_agent(self.config.user_agent.as_str())
            .default_headers(headers)
            .connect_timeout(self.config.connect_timeout)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))
    }

    fn default_headers(&self) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(self.config.headers.len());
        for (name, value) in &self.config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                AppError::configuration(format!("Invalid upstream header name '{name}'"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|_| {
                AppError::configuration(format!("Invalid value for upstream header '{name}'"))
            })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}
