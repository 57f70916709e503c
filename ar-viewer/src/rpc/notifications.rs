use bevy::prelude::*;
use serde_json::json;

use super::web_rpc::WebRpcInterface;
use crate::engine::loading::progress::LoadingProgress;
use crate::tools::interaction::TargetPicked;
use crate::tools::placement::PlacementTransition;

#[cfg(target_arch = "wasm32")]
use crate::xr::session_driver::PendingSourceRequests;

/// One notification per placement edge; the host shows its prompts from these.
pub fn notify_placement_transitions(
    mut transitions: EventReader<PlacementTransition>,
    mut rpc: ResMut<WebRpcInterface>,
) {
    for transition in transitions.read() {
        info!(
            "Placement {} → {}",
            transition.from.as_str(),
            transition.to.as_str()
        );
        rpc.send_notification(
            "placement_state_changed",
            json!({
                "state": transition.to,
                "from": transition.from,
            }),
        );
    }
}

pub fn notify_target_picks(mut picks: EventReader<TargetPicked>, mut rpc: ResMut<WebRpcInterface>) {
    for picked in picks.read() {
        rpc.send_notification("target_picked", json!({ "name": picked.name }));
    }
}

pub fn notify_loading_progress(
    progress: Res<LoadingProgress>,
    mut rpc: ResMut<WebRpcInterface>,
) {
    if !progress.is_changed() {
        return;
    }
    rpc.send_notification(
        "scene_loading",
        json!({
            "stage": progress.stage,
            "failed": progress.failed,
            "error": progress.error,
        }),
    );
}

/// Forwards hit-test source requests to the host page, which answers with
/// `hit_test_source_resolved`.
#[cfg(target_arch = "wasm32")]
pub fn notify_source_requests(
    mut requests: ResMut<PendingSourceRequests>,
    mut rpc: ResMut<WebRpcInterface>,
) {
    for request in requests.0.drain(..) {
        rpc.send_notification(
            "request_hit_test_source",
            json!({
                "request_id": request.request_id,
                "space": request.space,
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::loading::progress::LoadingStage;
    use crate::tools::placement::PlacementState;

    #[test]
    fn transitions_and_picks_are_forwarded_in_order() {
        let mut app = App::new();
        app.init_resource::<WebRpcInterface>()
            .add_event::<PlacementTransition>()
            .add_event::<TargetPicked>()
            .add_systems(Update, (notify_placement_transitions, notify_target_picks).chain());

        app.world_mut().send_event(PlacementTransition {
            from: PlacementState::SurfaceFound,
            to: PlacementState::Placed,
        });
        app.world_mut().send_event(TargetPicked {
            name: "Lamp".into(),
        });
        app.update();

        let sent = app.world().resource::<WebRpcInterface>().pending_notifications();
        assert_eq!(sent[0].method, "placement_state_changed");
        assert_eq!(sent[0].params["state"], "placed");
        assert_eq!(sent[0].params["from"], "surface_found");
        assert_eq!(sent[1].method, "target_picked");
        assert_eq!(sent[1].params["name"], "Lamp");
    }

    #[test]
    fn loading_progress_is_sent_only_when_it_changes() {
        let mut app = App::new();
        app.init_resource::<WebRpcInterface>()
            .init_resource::<LoadingProgress>()
            .add_systems(Update, notify_loading_progress);

        app.update();
        app.update();
        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .advance(LoadingStage::Scene);
        app.update();

        let sent = app.world().resource::<WebRpcInterface>().pending_notifications();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].params["stage"], "scene");
        assert_eq!(sent[1].params["failed"], false);
    }
}
