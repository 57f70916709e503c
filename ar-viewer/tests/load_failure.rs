use ar_viewer::ArViewerError;
use ar_viewer::engine::camera::XrCamera;
use ar_viewer::engine::core::app_setup::configure_viewer_sets;
use ar_viewer::engine::core::app_state::{
    AppState, ViewerSet, transition_to_load_failed, transition_to_running,
};
use ar_viewer::engine::loading::progress::LoadingProgress;
use ar_viewer::rpc::notifications::notify_loading_progress;
use ar_viewer::rpc::web_rpc::WebRpcInterface;
use ar_viewer::tools::interaction::{InteractionPlugin, SelectGesture};
use ar_viewer::tools::placement::{PlacementController, PlacementPlugin, PlacementState};
use ar_viewer::xr::XrPlugin;
use ar_viewer::xr::frame::{
    HitTestResult, HitTestSourceId, HitTestSourceResolved, ReferenceSpace, XrFrame, XrSessionEvent,
};
use ar_viewer::xr::session_driver::PendingSourceRequests;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

/// The viewer's runtime plugins with the loading pipeline replaced by a
/// hand-driven `LoadingProgress`. Outbound notifications are left queued.
fn viewer_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .init_state::<AppState>();
    configure_viewer_sets(&mut app);

    app.add_plugins((XrPlugin, PlacementPlugin, InteractionPlugin))
        .init_resource::<LoadingProgress>()
        .init_resource::<WebRpcInterface>()
        .add_systems(
            Update,
            (transition_to_running, transition_to_load_failed)
                .chain()
                .before(ViewerSet::Inbox)
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(Update, notify_loading_progress.in_set(ViewerSet::Outbox));

    app.world_mut()
        .spawn((XrCamera, Transform::IDENTITY, GlobalTransform::IDENTITY));
    app
}

fn fail_scene_load(app: &mut App) {
    app.world_mut()
        .resource_mut::<LoadingProgress>()
        .fail(ArViewerError::SceneLoad {
            path: "scenes/missing.glb".into(),
            reason: "404 Not Found".into(),
        });
}

fn app_state(app: &App) -> AppState {
    *app.world().resource::<State<AppState>>().get()
}

fn loading_notifications(app: &App) -> Vec<serde_json::Value> {
    app.world()
        .resource::<WebRpcInterface>()
        .pending_notifications()
        .iter()
        .filter(|notification| notification.method == "scene_loading")
        .map(|notification| notification.params.clone())
        .collect()
}

#[test]
fn failed_scene_load_moves_to_load_failed_and_tells_host() {
    let mut app = viewer_app();
    app.update();
    assert_eq!(app_state(&app), AppState::Loading);

    fail_scene_load(&mut app);
    app.update();
    app.update();

    assert_eq!(app_state(&app), AppState::LoadFailed);
    let notifications = loading_notifications(&app);
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0]["failed"], false);
    let failed = &notifications[1];
    assert_eq!(failed["failed"], true);
    assert_eq!(failed["stage"], "manifest");
    assert!(
        failed["error"]
            .as_str()
            .is_some_and(|error| error.contains("scenes/missing.glb"))
    );
}

#[test]
fn nothing_is_placed_after_load_failure() {
    let mut app = viewer_app();
    fail_scene_load(&mut app);
    app.update();
    app.update();
    assert_eq!(app_state(&app), AppState::LoadFailed);

    app.world_mut().send_event(XrSessionEvent::Started);
    app.world_mut().send_event(XrFrame::empty(0.0));
    app.update();
    // Frames are not driven, so no source was ever asked for.
    assert!(app.world().resource::<PendingSourceRequests>().0.is_empty());

    let source = HitTestSourceId(3);
    app.world_mut().send_event(HitTestSourceResolved {
        request_id: 1,
        outcome: Ok(source),
    });
    for t in 1..4 {
        app.world_mut().send_event(XrFrame::empty(t as f64 * 16.0).with_hits(
            source,
            vec![HitTestResult::new(
                ReferenceSpace::Local,
                Mat4::from_translation(Vec3::NEG_Z),
            )],
        ));
        app.world_mut().send_event(SelectGesture);
        app.update();
    }

    let controller = app.world().resource::<PlacementController>();
    assert_eq!(controller.state(), PlacementState::Scanning);
    assert!(!controller.has_placed());
    assert!(!controller.reticle().visible);
    assert_eq!(app_state(&app), AppState::LoadFailed);
}
