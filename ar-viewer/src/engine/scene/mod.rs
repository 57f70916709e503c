//! Scene entities owned by the viewer: the placement reticle and the
//! root the loaded glTF scene hangs from.

/// Reticle gizmo mesh and spawn helper.
pub mod reticle;

use bevy::prelude::*;

pub use reticle::{ReticleGizmo, spawn_reticle};

/// Root entity of the loaded scene. Hidden until placed.
#[derive(Component, Debug, Default)]
pub struct PlacedSceneRoot;
