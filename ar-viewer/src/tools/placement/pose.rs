use bevy::prelude::*;
use constants::placement::MIN_FACING_DISTANCE;

/// Position, rotation and scale recovered from a pose matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposedPose {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl DecomposedPose {
    pub fn to_transform(self) -> Transform {
        Transform {
            translation: self.translation,
            rotation: self.rotation,
            scale: self.scale,
        }
    }
}

/// Boundary function splitting a tracked pose into its parts. Injected into
/// the placement controller so tests can substitute their own.
pub type PoseDecomposer = fn(&Mat4) -> DecomposedPose;

pub fn decompose_pose(pose: &Mat4) -> DecomposedPose {
    let (scale, rotation, translation) = pose.to_scale_rotation_translation();
    DecomposedPose {
        translation,
        rotation,
        scale,
    }
}

/// Rotation about +Y that turns an object at `from` so its local +Z axis
/// points at `to`, ignoring height difference. Identity when `to` is
/// directly above or below `from`.
pub fn yaw_towards(from: Vec3, to: Vec3) -> Quat {
    let offset = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    if offset.length_squared() < MIN_FACING_DISTANCE * MIN_FACING_DISTANCE {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_y(offset.x.atan2(offset.z))
}
