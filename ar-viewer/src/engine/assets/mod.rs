//! Viewer configuration loaded from `manifest.json`.
//!
//! Scene path and author scale, hit-test reference spaces and the
//! interaction section, each defaulting to the compiled-in constants.

/// Manifest asset type and its sections.
pub mod viewer_manifest;

pub use viewer_manifest::{HitTestSettings, SceneSettings, ViewerManifest};
