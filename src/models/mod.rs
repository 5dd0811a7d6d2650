//! Data models shared by the resolution and relay pipeline.
//!
//! Everything here is request-scoped: manifests are decoded, normalized and
//! returned, never stored.

pub mod media;
pub mod platform;
pub mod serde_helpers;

pub use media::{DownloadResult, NormalizedMedia, RawMedia, ResolutionRequest, ResolverManifest};
pub use platform::Platform;
