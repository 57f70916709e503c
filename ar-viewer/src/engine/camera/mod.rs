//! Viewer camera driven by the platform's per-frame viewer pose.
//!
//! On the web the host page reports where the device is; the camera entity
//! simply follows it so the rendered scene lines up with the camera feed.

/// Camera marker, pose snapshot and the system that applies viewer poses.
pub mod xr_camera;

pub use xr_camera::{CameraPose, XrCamera, apply_viewer_pose};
