//! Media download-resolution gateway.
//!
//! Classifies a media page URL, asks the resolution service for its
//! downloadable variants, normalizes the manifest and relays chosen media
//! back to clients as attachments.

pub mod config;
pub mod errors;
pub mod models;
pub mod proxy;
pub mod services;
pub mod utils;
pub mod web;
