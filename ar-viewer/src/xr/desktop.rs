use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use constants::placement::{DESKTOP_CAMERA_POSITION, DESKTOP_GROUND_HEIGHT};

use super::frame::{HitTestResult, HitTestSourceId, HitTestSourceResolved, XrFrame};
use super::hit_test::HitTestSession;
use super::session_driver::PendingSourceRequests;
use super::{XrInbox, XrMessage};
use crate::engine::core::app_state::ViewerSet;

const LOOK_SENSITIVITY: f32 = 0.0035;
const MOVE_SPEED: f32 = 1.5;

/// Fly-through viewer standing in for a tracked device.
///
/// Each update becomes one platform frame: the viewer pose plus, once a
/// source is resolved, the point where the viewer's forward ray meets the
/// ground plane, which is what a viewer-space hit-test source reports.
#[derive(Resource, Debug)]
pub struct DesktopPreview {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub ground_height: f32,
    source: Option<HitTestSourceId>,
    next_source: u32,
}

impl Default for DesktopPreview {
    fn default() -> Self {
        let position = Vec3::from_array(DESKTOP_CAMERA_POSITION);
        let to_origin = -position;
        Self {
            position,
            yaw: (-to_origin.x).atan2(-to_origin.z),
            pitch: to_origin.y.atan2(Vec2::new(to_origin.x, to_origin.z).length()),
            ground_height: DESKTOP_GROUND_HEIGHT,
            source: None,
            next_source: 1,
        }
    }
}

impl DesktopPreview {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn viewer_pose(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Hands out a source for a request. The preview never refuses.
    pub fn grant_source(&mut self) -> HitTestSourceId {
        let source = HitTestSourceId(self.next_source);
        self.next_source += 1;
        self.source = Some(source);
        source
    }

    pub fn ground_hit(&self) -> Option<Vec3> {
        ground_plane_hit(self.position, self.forward(), self.ground_height)
    }
}

/// Intersection of a ray with the horizontal plane `y = plane_y`, in front
/// of the origin only.
pub fn ground_plane_hit(origin: Vec3, direction: Vec3, plane_y: f32) -> Option<Vec3> {
    if direction.y.abs() < 0.001 {
        return None;
    }
    let t = (plane_y - origin.y) / direction.y;
    if t > 0.0 {
        Some(origin + direction * t)
    } else {
        None
    }
}

pub struct DesktopPreviewPlugin;

impl Plugin for DesktopPreviewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DesktopPreview>()
            .add_systems(Startup, start_desktop_session)
            .add_systems(
                Update,
                (
                    resolve_desktop_source_requests,
                    move_desktop_viewer,
                    synthesise_desktop_frame,
                    map_clicks_to_select,
                )
                    .chain()
                    .in_set(ViewerSet::Inbox),
            );
    }
}

fn start_desktop_session(mut inbox: XrInbox) {
    info!("Desktop preview: starting synthetic XR session");
    inbox.deliver(XrMessage::SessionStarted);
}

fn resolve_desktop_source_requests(
    mut requests: ResMut<PendingSourceRequests>,
    mut preview: ResMut<DesktopPreview>,
    mut inbox: XrInbox,
) {
    for request in requests.0.drain(..) {
        let source = preview.grant_source();
        info!(
            "Desktop preview: granting hit-test source {:?} for request {} ({})",
            source,
            request.request_id,
            request.space.as_str()
        );
        inbox.deliver(XrMessage::SourceResolved(HitTestSourceResolved {
            request_id: request.request_id,
            outcome: Ok(source),
        }));
    }
}

// Right drag looks around, WASD/QE moves.
fn move_desktop_viewer(
    mut preview: ResMut<DesktopPreview>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        preview.yaw -= mouse_delta.x * LOOK_SENSITIVITY;
        preview.pitch = (preview.pitch - mouse_delta.y * LOOK_SENSITIVITY).clamp(-1.55, 1.55);
    }

    let mut move_input = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) { move_input.z -= 1.0; }
    if keyboard.pressed(KeyCode::KeyS) { move_input.z += 1.0; }
    if keyboard.pressed(KeyCode::KeyD) { move_input.x += 1.0; }
    if keyboard.pressed(KeyCode::KeyA) { move_input.x -= 1.0; }
    if keyboard.pressed(KeyCode::KeyE) { move_input.y += 1.0; }
    if keyboard.pressed(KeyCode::KeyQ) { move_input.y -= 1.0; }

    if move_input != Vec3::ZERO {
        let heading = Quat::from_rotation_y(preview.yaw);
        let step = heading * move_input.normalize() * MOVE_SPEED * time.delta_secs();
        preview.position += step;
    }
}

fn synthesise_desktop_frame(
    preview: Res<DesktopPreview>,
    session: Res<HitTestSession>,
    time: Res<Time>,
    mut inbox: XrInbox,
) {
    let mut frame = XrFrame::empty(time.elapsed_secs_f64() * 1000.0).with_viewer(preview.viewer_pose());
    if let Some(source) = preview.source {
        let results = preview
            .ground_hit()
            .map(|point| HitTestResult::new(session.result_space(), Mat4::from_translation(point)))
            .into_iter()
            .collect();
        frame = frame.with_hits(source, results);
    }
    inbox.deliver(XrMessage::Frame(frame));
}

fn map_clicks_to_select(mouse_button: Res<ButtonInput<MouseButton>>, mut inbox: XrInbox) {
    if mouse_button.just_pressed(MouseButton::Left) {
        inbox.deliver(XrMessage::Select);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_hit_in_front_only() {
        let hit = ground_plane_hit(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -1.0, -1.0), 0.0);
        assert_eq!(hit, Some(Vec3::new(0.0, 0.0, -2.0)));

        assert_eq!(ground_plane_hit(Vec3::new(0.0, 2.0, 0.0), Vec3::Y, 0.0), None);
        assert_eq!(ground_plane_hit(Vec3::ONE, Vec3::X, 0.0), None);
    }

    #[test]
    fn default_viewer_looks_at_the_origin() {
        let preview = DesktopPreview::default();
        let towards_origin = (-preview.position).normalize();

        assert!(preview.forward().abs_diff_eq(towards_origin, 1e-5));
        let hit = preview.ground_hit().unwrap();
        assert!(hit.abs_diff_eq(Vec3::ZERO, 1e-4));
    }

    #[test]
    fn granted_sources_are_distinct() {
        let mut preview = DesktopPreview::default();
        assert_ne!(preview.grant_source(), preview.grant_source());
    }
}
