use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::SCENE_LIGHT_ILLUMINANCE;

use crate::engine::assets::ViewerManifest;
use crate::engine::camera::XrCamera;
use crate::engine::core::app_state::{
    AppState, ViewerSet, transition_to_load_failed, transition_to_running,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{
    ManifestLoader, load_manifest_system, start_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_loader::{
    SceneLoader, cache_interaction_targets, spawn_scene_when_ready,
};
use crate::engine::scene::spawn_reticle;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::interaction::InteractionPlugin;
use crate::tools::placement::PlacementPlugin;
use crate::xr::XrPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::xr::desktop::DesktopPreviewPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers ViewerManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ViewerManifest>::new(&["json"]))
        .insert_resource(create_clear_colour());

    configure_viewer_sets(&mut app);

    app.add_plugins((XrPlugin, PlacementPlugin, InteractionPlugin, WebRpcPlugin));

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_plugins(DesktopPreviewPlugin);
    }

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<SceneLoader>();

    add_loading_systems(&mut app);

    app
}

/// Orders every Update system the viewer adds. Shared with headless test apps.
pub fn configure_viewer_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            ViewerSet::Inbox,
            ViewerSet::Session,
            ViewerSet::Frames,
            ViewerSet::Input,
            ViewerSet::SceneSync,
            ViewerSet::Outbox,
        )
            .chain(),
    );
}

fn add_loading_systems(app: &mut App) {
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                load_manifest_system,
                spawn_scene_when_ready,
                cache_interaction_targets,
                transition_to_running,
                transition_to_load_failed,
            )
                .chain()
                .before(ViewerSet::Inbox)
                .run_if(in_state(AppState::Loading)),
        );
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: SCENE_LIGHT_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

fn spawn_xr_camera(commands: &mut Commands) {
    // On the web the first frame's viewer pose replaces this.
    #[cfg(target_arch = "wasm32")]
    let transform = Transform::IDENTITY;

    #[cfg(not(target_arch = "wasm32"))]
    let transform = {
        use constants::placement::DESKTOP_CAMERA_POSITION;
        Transform::from_translation(Vec3::from_array(DESKTOP_CAMERA_POSITION))
            .looking_at(Vec3::ZERO, Vec3::Y)
    };

    commands.spawn((Camera3d::default(), transform, XrCamera, Name::new("XrCamera")));
}

// Startup system that only handles basic initialisation
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_lighting(&mut commands);
    spawn_xr_camera(&mut commands);
    spawn_reticle(&mut commands, &mut meshes, &mut materials);
}

fn create_clear_colour() -> ClearColor {
    // The web canvas is composited over the device camera feed.
    #[cfg(target_arch = "wasm32")]
    {
        ClearColor(Color::NONE)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        ClearColor(Color::srgb(0.12, 0.12, 0.14))
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
