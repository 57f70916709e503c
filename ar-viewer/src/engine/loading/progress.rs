use bevy::prelude::*;
use serde::Serialize;

use crate::error::ArViewerError;

/// Loading pipeline stages, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingStage {
    #[default]
    Manifest,
    Scene,
    Targets,
    Ready,
}

#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub stage: LoadingStage,
    pub scene_instanced: bool,
    pub failed: bool,
    pub error: Option<String>,
}

impl LoadingProgress {
    pub fn advance(&mut self, stage: LoadingStage) {
        info!("✓ Loading stage {:?} → {:?}", self.stage, stage);
        self.stage = stage;
    }

    /// Terminal: the viewer stays unplaced and invisible.
    pub fn fail(&mut self, err: ArViewerError) {
        error!("✗ Loading failed at {:?}: {}", self.stage, err);
        self.failed = true;
        self.error = Some(err.to_string());
    }
}
