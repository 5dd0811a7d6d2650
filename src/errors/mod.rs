//! Centralized error handling for the media gateway
//!
//! Every failure a request can hit is expressed as one of the types in
//! [`types`] and mapped to an HTTP response in `web::responses`.
//!
//! # Error Categories
//!
//! - **Validation Errors**: required request input is missing
//! - **Upstream Errors**: the resolution service failed, timed out or rejected the link
//! - **Relay Errors**: a media host could not be streamed
//!
//! # Usage
//!
//! ```rust
//! use media_gateway::errors::{AppError, AppResult};
//!
//! fn require_url(url: Option<&str>) -> AppResult<&str> {
//!     url.filter(|u| !u.is_empty())
//!         .ok_or_else(|| AppError::validation("URL required"))
//! }
//!
//! assert!(require_url(None).is_err());
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for resolution Results
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Convenience type alias for relay Results
pub type RelayResult<T> = Result<T, RelayError>;
