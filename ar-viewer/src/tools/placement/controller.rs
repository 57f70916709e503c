use bevy::prelude::*;
use constants::placement::DEFAULT_AUTHOR_SCALE;

use super::pose::{PoseDecomposer, decompose_pose, yaw_towards};
use super::state::{PlacedRoot, PlacementState, PlacementTransition, Reticle};
use crate::xr::frame::{HitTestResult, ReferenceSpace};

/// Single writer of the reticle and the placed root.
#[derive(Resource, Debug)]
pub struct PlacementController {
    state: PlacementState,
    reticle: Reticle,
    root: PlacedRoot,
    author_scale: f32,
    decompose: PoseDecomposer,
}

impl Default for PlacementController {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHOR_SCALE)
    }
}

impl PlacementController {
    pub fn new(author_scale: f32) -> Self {
        Self::with_decomposer(author_scale, decompose_pose)
    }

    pub fn with_decomposer(author_scale: f32, decompose: PoseDecomposer) -> Self {
        Self {
            state: PlacementState::Scanning,
            reticle: Reticle::default(),
            root: PlacedRoot::default(),
            author_scale,
            decompose,
        }
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn has_placed(&self) -> bool {
        self.state.has_placed()
    }

    pub fn reticle(&self) -> &Reticle {
        &self.reticle
    }

    pub fn placed_root(&self) -> &PlacedRoot {
        &self.root
    }

    pub fn author_scale(&self) -> f32 {
        self.author_scale
    }

    /// Manifest-provided scale. Ignored once the root has been placed.
    pub fn set_author_scale(&mut self, scale: f32) {
        if self.has_placed() {
            warn!("Ignoring author scale change after placement");
            return;
        }
        self.author_scale = scale;
    }

    /// Reticle pose as a transform, split by the injected decomposer.
    pub fn reticle_transform(&self) -> Transform {
        (self.decompose)(&self.reticle.pose).to_transform()
    }

    /// Feeds one frame's hit-test results. Returns the state edge, if any.
    pub fn update_from_hit_results(
        &mut self,
        results: &[HitTestResult],
        space: ReferenceSpace,
    ) -> Option<PlacementTransition> {
        if self.has_placed() {
            return None;
        }

        let from = self.state;
        match results.first().and_then(|hit| hit.resolved_pose(space)) {
            Some(pose) => {
                self.reticle.visible = true;
                self.reticle.pose = pose;
                if from == PlacementState::Scanning {
                    self.state = PlacementState::SurfaceFound;
                }
            }
            None => {
                self.reticle.visible = false;
                if from == PlacementState::SurfaceFound {
                    self.state = PlacementState::Scanning;
                }
            }
        }

        (self.state != from).then_some(PlacementTransition {
            from,
            to: self.state,
        })
    }

    /// Fixes the root at the reticle, turned to face `camera_position`.
    /// Silent no-op unless a surface is currently tracked and nothing has
    /// been placed yet.
    pub fn place(&mut self, camera_position: Vec3) -> Option<PlacementTransition> {
        if self.has_placed() || !self.reticle.visible {
            debug!("Select ignored: no tracked surface to place on");
            return None;
        }

        let parts = (self.decompose)(&self.reticle.pose);
        self.root.transform = Transform {
            translation: parts.translation,
            rotation: yaw_towards(parts.translation, camera_position),
            scale: Vec3::splat(self.author_scale),
        };
        self.root.visible = true;
        self.reticle.visible = false;

        let from = self.state;
        self.state = PlacementState::Placed;
        info!("Scene placed at {:?}", parts.translation);

        Some(PlacementTransition {
            from,
            to: PlacementState::Placed,
        })
    }
}
