//! Viewer tools driven by platform frames and select gestures.
//!
//! ## Select Dispatch
//!
//! A select gesture goes to exactly one tool, decided by the placement flag:
//!
//! ```text
//! SelectGesture
//!   └─> handle_select_gestures()
//!       ├─> not placed: PlacementController::place()
//!       └─> placed:     raycaster::pick() ─> TargetPicked
//!                                            ├─> behaviours (spin / pop)
//!                                            └─> target_picked notification
//! ```
//!
//! ## Available Tools
//!
//! ### Placement
//! - **Input**: hit-test results from every platform frame
//! - **Purpose**: track a reticle on real surfaces, then fix the scene
//!   root there, turned to face the viewer, at the manifest's author scale
//! - **Lifecycle**: `Scanning ⇄ SurfaceFound → Placed`; `Placed` is final
//!
//! ### Interaction
//! - **Input**: select gestures after placement
//! - **Purpose**: cast the camera-forward ray against the configured
//!   target objects and report the nearest one

/// Picking named scene objects and reacting to picks.
pub mod interaction;

/// Surface placement state machine, reticle and scene root sync.
pub mod placement;
