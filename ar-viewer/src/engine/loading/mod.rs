//! Asset loading pipeline for the viewer manifest and the glTF scene.
//!
//! Manifest → scene → interaction target cache, with progress tracking and
//! a terminal failure path. Each stage polls its asset the same way.

/// Viewer manifest loading and application to runtime resources.
pub mod manifest_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// glTF scene spawning under the hidden placed root, and target caching.
pub mod scene_loader;
