//! JSON-RPC 2.0 bridge between the viewer and the host page.
//!
//! The host page owns the WebXR session and the camera feed; the viewer is
//! a transparent canvas over it. Both sides talk over `postMessage`.
//!
//! ```text
//! Host page (WebXR)                      Bevy viewer
//!        │                                        │
//!        ├─ xr_session_started / xr_frame ──────> │  XR events
//!        ├─ hit_test_source_resolved ───────────> │
//!        ├─ xr_select / xr_session_ended ───────> │
//!        │ <────────────── request_hit_test_source ┤
//!        │ <──── placement_state_changed, target_picked,
//!        │       scene_loading, debug_message ────┤
//!        ├─ get_placement_state (id) ───────────> │
//!        │ <─────────────────── Response (with id)┤
//! ```
//!
//! Matrices travel as 16 floats in column-major order, the layout of
//! `XRRigidTransform.matrix`.
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//!
//! Malformed notifications have no id to answer, so they are reported back
//! as a `debug_message` notification and logged.

/// Outbound notification systems.
pub mod notifications;

/// Transport, request handling and the message listener.
pub mod web_rpc;

/// Parsing of the XR protocol notifications into platform messages.
pub mod xr_messages;
