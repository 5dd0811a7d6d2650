//! Error type definitions for the media gateway
//!
//! This module defines all error types used throughout the application,
//! providing a hierarchical error system that keeps upstream detail in the
//! logs and out of client responses.

use thiserror::Error;

/// Top-level application error type
///
/// This enum represents all possible errors that can occur while handling a
/// request. It uses `thiserror` to provide automatic error trait
/// implementations and proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or unusable request input
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resolution service errors
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Media relay errors
    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Resolution service specific errors
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The resolver answered but did not report success
    #[error("Resolver rejected the link (status: {status})")]
    Rejected { status: String },

    /// No complete answer within the resolver timeout
    #[error("Resolver timed out after {timeout_ms}ms: {url}")]
    Timeout { url: String, timeout_ms: u128 },

    /// Non-success HTTP status from the resolver
    #[error("Resolver HTTP error: {status}")]
    Http { status: u16 },

    /// Connection, TLS or body transfer failures
    #[error("Resolver request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// A successful answer whose envelope could not be decoded
    #[error("Invalid manifest: {0}")]
    InvalidManifest(#[from] serde_json::Error),
}

/// Media relay specific errors
#[derive(Error, Debug)]
pub enum RelayError {
    /// No media URL was given
    #[error("No media URL supplied")]
    MissingUrl,

    /// The query string could not be decoded
    #[error("Unreadable relay query: {message}")]
    InvalidQuery { message: String },

    /// The requested filename cannot be carried in a header
    #[error("Invalid filename: {filename}")]
    InvalidFilename { filename: String },

    /// The media host did not answer within the relay timeout
    #[error("Media host timed out after {timeout_ms}ms: {url}")]
    Timeout { url: String, timeout_ms: u128 },

    /// Non-success HTTP status from the media host
    #[error("Media host HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Connection or request construction failures
    #[error("Media host request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The relayed response could not be assembled
    #[error("Invalid relay response: {message}")]
    InvalidResponse { message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl UpstreamError {
    /// Classify a reqwest failure from a resolver call
    pub fn from_reqwest(error: reqwest::Error, url: &str, timeout: std::time::Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis(),
            }
        } else if let Some(status) = error.status() {
            Self::Http {
                status: status.as_u16(),
            }
        } else {
            Self::Network(error)
        }
    }

    /// Whether the failure is a deliberate "no" from the resolver rather
    /// than a transport or protocol problem
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl RelayError {
    /// Whether the client, not the media host, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingUrl)
    }

    /// Create a timeout error
    pub fn timeout<U: Into<String>>(url: U, timeout: std::time::Duration) -> Self {
        Self::Timeout {
            url: url.into(),
            timeout_ms: timeout.as_millis(),
        }
    }
}
