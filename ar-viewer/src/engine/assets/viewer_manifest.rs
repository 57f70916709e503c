use bevy::prelude::*;
use constants::path::DEFAULT_SCENE_PATH;
use constants::placement::DEFAULT_AUTHOR_SCALE;
use serde::{Deserialize, Serialize};

use crate::tools::interaction::InteractionSettings;
use crate::xr::frame::ReferenceSpace;

/// The glTF scene to place and the scale it was authored at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub path: String,
    /// Uniform scale applied to the placed root.
    pub scale: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            path: DEFAULT_SCENE_PATH.to_string(),
            scale: DEFAULT_AUTHOR_SCALE,
        }
    }
}

/// Reference spaces for the hit-test source and its results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestSettings {
    #[serde(rename = "space")]
    pub source_space: ReferenceSpace,
    pub result_space: ReferenceSpace,
}

impl Default for HitTestSettings {
    fn default() -> Self {
        Self {
            source_space: ReferenceSpace::Viewer,
            result_space: ReferenceSpace::Local,
        }
    }
}

/// Viewer manifest as a Bevy asset. Mirrors the JSON structure; every
/// field may be omitted.
#[derive(Asset, Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypePath)]
#[serde(default)]
pub struct ViewerManifest {
    pub scene: SceneSettings,
    pub hit_test: HitTestSettings,
    pub interaction: InteractionSettings,
}
