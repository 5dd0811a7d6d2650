//! HTTP request handlers
//!
//! Thin handlers; resolution and relay logic lives in `services` and `proxy`.

pub mod download;
pub mod health;
pub mod stream;
