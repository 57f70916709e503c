use bevy::prelude::*;
use serde::Serialize;

/// Placement state machine. `Placed` is terminal for the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementState {
    #[default]
    Scanning,
    SurfaceFound,
    Placed,
}

impl PlacementState {
    /// Gates whether hit-test results may still move the reticle.
    pub fn has_placed(self) -> bool {
        self == Self::Placed
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scanning => "scanning",
            Self::SurfaceFound => "surface_found",
            Self::Placed => "placed",
        }
    }
}

/// Proxy for "the surface point under the current view".
/// Visible only when the most recent frame carried a hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reticle {
    pub pose: Mat4,
    pub visible: bool,
}

impl Default for Reticle {
    fn default() -> Self {
        Self {
            pose: Mat4::IDENTITY,
            visible: false,
        }
    }
}

/// Transform and visibility of the loaded scene's single root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedRoot {
    pub transform: Transform,
    pub visible: bool,
}

impl Default for PlacedRoot {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            visible: false,
        }
    }
}

/// Fired once per state edge. Drives the host's one-shot prompts.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementTransition {
    pub from: PlacementState,
    pub to: PlacementState,
}
