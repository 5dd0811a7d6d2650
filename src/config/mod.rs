use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{info, warn};

pub mod defaults;
pub mod duration_serde;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for every outbound call the gateway makes.
///
/// Built once at startup and shared read-only; collaborators receive it
/// explicitly rather than reaching for process-wide client defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Endpoint of the media resolution service
    #[serde(default = "default_resolver_url")]
    pub resolver_url: String,

    /// Total time allowed for one resolution request
    #[serde(default = "default_resolver_timeout", with = "duration_serde::duration")]
    pub resolver_timeout: Duration,

    /// Time allowed for a media host to answer with a response head.
    /// The body itself is never subject to a timeout.
    #[serde(default = "default_relay_timeout", with = "duration_serde::duration")]
    pub relay_timeout: Duration,

    #[serde(default = "default_connect_timeout", with = "duration_serde::duration")]
    pub connect_timeout: Duration,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Extra headers sent with every outbound request
    #[serde(default = "default_browser_headers")]
    pub headers: BTreeMap<String, String>,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// Upstream defaults
fn default_resolver_url() -> String {
    DEFAULT_RESOLVER_URL.to_string()
}

fn default_resolver_timeout() -> Duration {
    DEFAULT_RESOLVER_TIMEOUT
}

fn default_relay_timeout() -> Duration {
    DEFAULT_RELAY_TIMEOUT
}

fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_browser_headers() -> BTreeMap<String, String> {
    DEFAULT_BROWSER_HEADERS
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            resolver_url: default_resolver_url(),
            resolver_timeout: default_resolver_timeout(),
            relay_timeout: default_relay_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
            headers: default_browser_headers(),
        }
    }
}

impl Config {
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        let config = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)
                .with_context(|| format!("Failed to read config file {config_file}"))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {config_file}"))?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            match std::fs::write(config_file, contents) {
                Ok(()) => info!("Created default config file: {}", config_file),
                Err(e) => warn!(
                    "Could not write default config file {}: {}. Continuing with defaults",
                    config_file, e
                ),
            }
            default_config
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail later, per request
    pub fn validate(&self) -> Result<()> {
        let resolver = reqwest::Url::parse(&self.upstream.resolver_url).with_context(|| {
            format!("Invalid upstream.resolver_url '{}'", self.upstream.resolver_url)
        })?;
        if !matches!(resolver.scheme(), "http" | "https") {
            anyhow::bail!(
                "upstream.resolver_url must be http or https, got '{}'",
                resolver.scheme()
            );
        }

        for (name, timeout) in [
            ("resolver_timeout", self.upstream.resolver_timeout),
            ("relay_timeout", self.upstream.relay_timeout),
            ("connect_timeout", self.upstream.connect_timeout),
        ] {
            if timeout.is_zero() {
                anyhow::bail!("upstream.{name} must be greater than zero");
            }
        }

        Ok(())
    }
}
