//! Media relay
//!
//! Streams bytes from a media host straight through to the client.

pub mod http_stream;

pub use http_stream::{content_disposition, RelayStreamer};
