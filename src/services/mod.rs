//! Business logic of the resolution pipeline.
//!
//! - [`platform_classifier`]: link → platform label
//! - [`resolver_client`]: label + link → upstream manifest
//! - [`manifest_normalizer`]: upstream manifest → client manifest

pub mod manifest_normalizer;
pub mod platform_classifier;
pub mod resolver_client;

pub use manifest_normalizer::{format_size, normalize, sanitize_title};
pub use platform_classifier::classify;
pub use resolver_client::ResolverClient;
