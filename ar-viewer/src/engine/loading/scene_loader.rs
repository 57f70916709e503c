use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::engine::loading::progress::{LoadingProgress, LoadingStage};
use crate::engine::scene::PlacedSceneRoot;
use crate::error::ArViewerError;
use crate::tools::interaction::{InteractionSettings, InteractionTargets};

/// Handle of the requested glTF scene and the root it was spawned under.
#[derive(Resource, Default)]
pub struct SceneLoader {
    path: String,
    handle: Option<Handle<Scene>>,
    root: Option<Entity>,
}

impl SceneLoader {
    pub fn request(&mut self, asset_server: &AssetServer, path: &str) {
        info!("Loading scene from {}", path);
        self.path = path.to_string();
        self.handle = Some(asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.to_string())));
    }

    pub fn root(&self) -> Option<Entity> {
        self.root
    }
}

/// Spawns the scene under a hidden root once the glTF has loaded.
pub fn spawn_scene_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    mut scene_loader: ResMut<SceneLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.stage != LoadingStage::Scene || loading_progress.failed {
        return;
    }
    let Some(handle) = scene_loader.handle.clone() else {
        return;
    };

    match asset_server.get_load_state(&handle) {
        Some(LoadState::Loaded) => {
            let root = commands
                .spawn((
                    SceneRoot(handle),
                    Transform::IDENTITY,
                    Visibility::Hidden,
                    PlacedSceneRoot,
                    Name::new("PlacedSceneRoot"),
                ))
                .observe(mark_scene_instanced)
                .id();
            scene_loader.root = Some(root);
            info!("✓ Scene loaded, spawned hidden root {:?}", root);
            loading_progress.advance(LoadingStage::Targets);
        }
        Some(LoadState::Failed(err)) => {
            loading_progress.fail(ArViewerError::SceneLoad {
                path: scene_loader.path.clone(),
                reason: err.to_string(),
            });
        }
        _ => {}
    }
}

fn mark_scene_instanced(
    _trigger: Trigger<SceneInstanceReady>,
    mut loading_progress: ResMut<LoadingProgress>,
) {
    loading_progress.scene_instanced = true;
}

/// Resolves the configured target names inside the instanced scene and
/// freezes the set. Missing names are logged and skipped.
pub fn cache_interaction_targets(
    mut loading_progress: ResMut<LoadingProgress>,
    scene_loader: Res<SceneLoader>,
    settings: Res<InteractionSettings>,
    children: Query<&Children>,
    names: Query<&Name>,
    mut commands: Commands,
) {
    if loading_progress.stage != LoadingStage::Targets || !loading_progress.scene_instanced {
        return;
    }
    let Some(root) = scene_loader.root() else {
        return;
    };

    let candidates: Vec<(&str, Entity)> = children
        .iter_descendants(root)
        .filter_map(|entity| names.get(entity).ok().map(|name| (name.as_str(), entity)))
        .collect();
    let (targets, missing) = InteractionTargets::resolve(&settings.targets, candidates);

    for name in &missing {
        warn!("Interaction target '{}' not found in scene", name);
    }
    info!("✓ Cached {} interaction targets: {:?}", targets.len(), targets.names());
    commands.insert_resource(targets);
    loading_progress.advance(LoadingStage::Ready);
}
