use bevy::prelude::*;

use super::ray::{OrientedBox, PickRay, ray_hits_obb};
use crate::engine::camera::CameraPose;

/// World-space volume of one interaction target: the boxes of every mesh
/// under it.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetVolume {
    pub name: String,
    pub boxes: Vec<OrientedBox>,
}

impl TargetVolume {
    pub fn new(name: impl Into<String>, boxes: Vec<OrientedBox>) -> Self {
        Self {
            name: name.into(),
            boxes,
        }
    }

    /// Closest accepted hit against any of this target's boxes.
    pub fn nearest_hit(&self, ray: &PickRay) -> Option<f32> {
        self.boxes
            .iter()
            .filter_map(|obb| ray_hits_obb(ray.origin, ray.direction, obb))
            .filter(|t| ray.accepts(*t))
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Casts the camera's forward ray against the targets and returns the name
/// of the nearest one hit. `None` when the scene is not shown, there are no
/// targets, or nothing lies within `[near, far]`.
pub fn pick<'a>(
    camera: CameraPose,
    root_visible: bool,
    volumes: &'a [TargetVolume],
    near: f32,
    far: f32,
) -> Option<&'a str> {
    if !root_visible || volumes.is_empty() {
        return None;
    }
    let ray = PickRay::from_camera(camera, near, far);
    if ray.direction == Vec3::ZERO {
        return None;
    }

    let mut best: Option<(f32, &TargetVolume)> = None;
    for volume in volumes {
        let Some(t) = volume.nearest_hit(&ray) else {
            continue;
        };
        // Strict less-than keeps the earlier target on ties.
        if best.is_none_or(|(best_t, _)| t < best_t) {
            best = Some((t, volume));
        }
    }
    best.map(|(_, volume)| volume.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_at(name: &str, center: Vec3) -> TargetVolume {
        TargetVolume::new(
            name,
            vec![OrientedBox::new(
                Mat4::from_translation(center),
                Vec3::ZERO,
                Vec3::splat(0.25),
            )],
        )
    }

    fn looking_down_negative_z() -> CameraPose {
        CameraPose {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        }
    }

    fn stacked_targets() -> Vec<TargetVolume> {
        vec![
            cube_at("Far", Vec3::new(0.0, 0.0, -3.0)),
            cube_at("Near", Vec3::new(0.0, 0.0, -1.0)),
            cube_at("Middle", Vec3::new(0.0, 0.0, -2.0)),
        ]
    }

    #[test]
    fn nearest_target_wins_regardless_of_order() {
        let volumes = stacked_targets();
        assert_eq!(pick(looking_down_negative_z(), true, &volumes, 0.01, 50.0), Some("Near"));
    }

    #[test]
    fn empty_target_set_picks_nothing() {
        assert_eq!(pick(looking_down_negative_z(), true, &[], 0.01, 50.0), None);
    }

    #[test]
    fn ray_missing_every_target_picks_nothing() {
        let camera = CameraPose {
            position: Vec3::ZERO,
            forward: Vec3::X,
        };
        assert_eq!(pick(camera, true, &stacked_targets(), 0.01, 50.0), None);
    }

    #[test]
    fn hidden_root_skips_the_raycast() {
        assert_eq!(pick(looking_down_negative_z(), false, &stacked_targets(), 0.01, 50.0), None);
    }

    #[test]
    fn far_limit_excludes_distant_targets() {
        let volumes = vec![cube_at("Far", Vec3::new(0.0, 0.0, -3.0))];
        assert_eq!(pick(looking_down_negative_z(), true, &volumes, 0.01, 2.0), None);
    }

    #[test]
    fn equal_distance_keeps_the_first_target() {
        let volumes = vec![
            cube_at("First", Vec3::new(0.0, 0.0, -2.0)),
            cube_at("Second", Vec3::new(0.0, 0.0, -2.0)),
        ];
        assert_eq!(pick(looking_down_negative_z(), true, &volumes, 0.01, 50.0), Some("First"));
    }

    #[test]
    fn target_made_of_several_meshes_uses_its_closest_box() {
        let split = TargetVolume::new(
            "Split",
            vec![
                OrientedBox::new(Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0)), Vec3::ZERO, Vec3::splat(0.25)),
                OrientedBox::new(Mat4::IDENTITY, Vec3::new(0.0, 0.0, -1.5), Vec3::splat(0.25)),
            ],
        );
        let volumes = vec![cube_at("Middle", Vec3::new(0.0, 0.0, -2.0)), split];

        assert_eq!(pick(looking_down_negative_z(), true, &volumes, 0.01, 50.0), Some("Split"));
    }
}
