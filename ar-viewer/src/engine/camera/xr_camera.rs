use bevy::prelude::*;

use crate::xr::frame::XrFrame;

/// Marks the single camera that follows the platform viewer pose.
#[derive(Component, Debug, Default)]
pub struct XrCamera;

/// World position and forward direction of the camera at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub forward: Vec3,
}

impl CameraPose {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: transform.translation,
            forward: transform.forward().as_vec3(),
        }
    }
}

/// Moves the camera to the latest tracked viewer pose, if any frame this
/// update carried one. Poses with scale or shear are reduced to rotation
/// and translation.
pub fn apply_viewer_pose(
    mut frames: EventReader<XrFrame>,
    mut cameras: Query<&mut Transform, With<XrCamera>>,
) {
    let Some(viewer) = frames.read().filter_map(|frame| frame.viewer).last() else {
        return;
    };
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };

    let (_, rotation, translation) = viewer.to_scale_rotation_translation();
    transform.translation = translation;
    transform.rotation = rotation;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_from_transform_uses_negative_z_forward() {
        let transform = Transform::from_xyz(1.0, 1.6, 0.0);
        let pose = CameraPose::from_transform(&transform);

        assert_eq!(pose.position, Vec3::new(1.0, 1.6, 0.0));
        assert!(pose.forward.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn pose_follows_rotation() {
        let transform = Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let pose = CameraPose::from_transform(&transform);

        assert!(pose.forward.abs_diff_eq(Vec3::NEG_X, 1e-5));
    }

    #[test]
    fn viewer_pose_moves_camera() {
        let mut app = App::new();
        app.add_event::<XrFrame>()
            .add_systems(Update, apply_viewer_pose);
        let camera = app.world_mut().spawn((XrCamera, Transform::IDENTITY)).id();

        let viewer = Mat4::from_rotation_translation(
            Quat::from_rotation_y(0.3),
            Vec3::new(0.0, 1.4, 0.2),
        );
        app.world_mut()
            .send_event(XrFrame::empty(0.0).with_viewer(viewer));
        app.update();

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!(transform.translation.abs_diff_eq(Vec3::new(0.0, 1.4, 0.2), 1e-5));
        assert!(transform.rotation.abs_diff_eq(Quat::from_rotation_y(0.3), 1e-5));
    }
}
