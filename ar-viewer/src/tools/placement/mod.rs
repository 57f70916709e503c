//! Surface placement: the scanning → surface found → placed state machine.
//!
//! [`PlacementController`] is the only writer of the reticle and of the
//! placed scene root. Systems in [`scene_sync`] copy its state onto the
//! matching entities after every input and frame has been applied.
//!
//! ```text
//! Scanning ──first hit──> SurfaceFound ──select──> Placed (terminal)
//!    ^                        │
//!    └──────no hits───────────┘
//! ```

/// Controller holding the state machine, reticle and placed root.
pub mod controller;

/// Pose decomposition and yaw-only facing math.
pub mod pose;

/// Copies controller state onto the reticle gizmo and scene root entities.
pub mod scene_sync;

/// Value types for the state machine and its edges.
pub mod state;

use bevy::prelude::*;

pub use controller::PlacementController;
pub use state::{PlacedRoot, PlacementState, PlacementTransition, Reticle};

use crate::engine::core::app_state::ViewerSet;
use scene_sync::{sync_placed_scene_root, sync_reticle_gizmo};

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlacementController>()
            .add_event::<PlacementTransition>()
            .add_systems(
                Update,
                (sync_reticle_gizmo, sync_placed_scene_root).in_set(ViewerSet::SceneSync),
            );
    }
}
