//! Select-gesture handling after placement: picking named objects in the
//! placed scene with a camera-forward ray, and what picking them does.
//!
//! The set of pickable objects is resolved once when the scene finishes
//! loading (see [`targets::InteractionTargets`]) and never changes after.

/// Per-target reactions to a pick (spin, pop, notify).
pub mod behaviours;

/// Ray and oriented box intersection.
pub mod ray;

/// Nearest-hit selection over target volumes.
pub mod raycaster;

/// Place-or-pick dispatch for select gestures.
pub mod select;

/// Frozen, ordered set of pickable scene objects.
pub mod targets;

use bevy::prelude::*;
use constants::interaction::{DEFAULT_TARGET_NAMES, RAY_FAR, RAY_NEAR};
use serde::{Deserialize, Serialize};

pub use behaviours::{BehaviourBinding, InteractionBehaviour};
pub use select::{SelectGesture, SelectRoute, SelectTarget, on_select};
pub use targets::{InteractionTarget, InteractionTargets};

use crate::engine::core::app_state::{AppState, ViewerSet};

/// Emitted when a select gesture's ray hits a target.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TargetPicked {
    pub name: String,
}

/// Interaction section of the viewer manifest.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Names of pickable objects, in tie-break order.
    pub targets: Vec<String>,
    pub near: f32,
    pub far: f32,
    pub behaviours: Vec<BehaviourBinding>,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            targets: DEFAULT_TARGET_NAMES.iter().map(|s| s.to_string()).collect(),
            near: RAY_NEAR,
            far: RAY_FAR,
            behaviours: Vec::new(),
        }
    }
}

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractionTargets>()
            .init_resource::<InteractionSettings>()
            .add_event::<SelectGesture>()
            .add_event::<TargetPicked>()
            .add_systems(
                Update,
                (
                    select::handle_select_gestures,
                    behaviours::apply_target_behaviours,
                )
                    .chain()
                    .in_set(ViewerSet::Input)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(
                Update,
                behaviours::spin_targets
                    .in_set(ViewerSet::SceneSync)
                    .run_if(in_state(AppState::Running)),
            );
    }
}
