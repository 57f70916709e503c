use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::MANIFEST_PATH;

use crate::engine::assets::ViewerManifest;
use crate::engine::loading::progress::{LoadingProgress, LoadingStage};
use crate::engine::loading::scene_loader::SceneLoader;
use crate::error::ArViewerError;
use crate::tools::interaction::InteractionSettings;
use crate::tools::placement::PlacementController;
use crate::xr::hit_test::HitTestSession;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<ViewerManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading manifest from {}", MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Applies the manifest once it is loaded and requests the scene.
#[allow(clippy::too_many_arguments)]
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut scene_loader: ResMut<SceneLoader>,
    mut controller: ResMut<PlacementController>,
    mut session: ResMut<HitTestSession>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<ViewerManifest>>,
) {
    if loading_progress.stage != LoadingStage::Manifest || loading_progress.failed {
        return;
    }
    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    if let Some(manifest) = manifests.get(handle) {
        info!(
            "✓ Manifest loaded: scene {} at scale {}",
            manifest.scene.path, manifest.scene.scale
        );
        controller.set_author_scale(manifest.scene.scale);
        session.set_spaces(manifest.hit_test.source_space, manifest.hit_test.result_space);
        commands.insert_resource::<InteractionSettings>(manifest.interaction.clone());

        scene_loader.request(&asset_server, &manifest.scene.path);
        loading_progress.advance(LoadingStage::Scene);
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        loading_progress.fail(ArViewerError::ManifestLoad {
            path: MANIFEST_PATH.to_string(),
            reason: err.to_string(),
        });
    }
}
