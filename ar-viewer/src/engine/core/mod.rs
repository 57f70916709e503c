//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and system ordering for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the XR bridge, placement and interaction
/// plugins, asset loading systems, and platform-specific configurations.
pub mod app_setup;

/// Application state machine, system ordering sets and loading transitions.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures a transparent canvas for web targets and vsync settings.
pub mod window_config;
