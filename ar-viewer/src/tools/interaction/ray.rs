use bevy::prelude::*;

use crate::engine::camera::CameraPose;

/// Pick ray with the distance window hits must fall inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRay {
    pub origin: Vec3,
    pub direction: Vec3,
    pub near: f32,
    pub far: f32,
}

impl PickRay {
    pub fn from_camera(camera: CameraPose, near: f32, far: f32) -> Self {
        Self {
            origin: camera.position,
            direction: camera.forward.normalize_or_zero(),
            near,
            far,
        }
    }

    pub fn accepts(&self, t: f32) -> bool {
        t >= self.near && t <= self.far
    }
}

/// Box in a mesh's local space, placed in the world by `world`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    pub world: Mat4,
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl OrientedBox {
    pub fn new(world: Mat4, center: Vec3, half_extents: Vec3) -> Self {
        Self {
            world,
            center,
            half_extents,
        }
    }
}

/// Ray parameter of the first hit against `obb`, in world units along `dir`.
pub fn ray_hits_obb(origin: Vec3, dir: Vec3, obb: &OrientedBox) -> Option<f32> {
    let inv = obb.world.inverse();
    if !inv.is_finite() {
        return None;
    }
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    ray_aabb_hit_t(
        o_local,
        d_local,
        obb.center - obb.half_extents,
        obb.center + obb.half_extents,
    )
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (ray_origin[axis], ray_direction[axis]);
        if d == 0.0 {
            // Parallel to this slab: miss unless the origin is inside it.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (mut t0, mut t1) = ((min[axis] - o) * inv, (max[axis] - o) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    Some(if t_enter >= 0.0 { t_enter } else { t_exit })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_box_in_front() {
        let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(-0.5, -0.5, -3.0), Vec3::new(0.5, 0.5, -2.0));
        assert_eq!(t, Some(2.0));
    }

    #[test]
    fn misses_box_behind() {
        let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::Z, Vec3::new(-0.5, -0.5, -3.0), Vec3::new(0.5, 0.5, -2.0));
        assert_eq!(t, None);
    }

    #[test]
    fn axis_parallel_ray_outside_slab_misses() {
        let t = ray_aabb_hit_t(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z, Vec3::splat(-1.0) - Vec3::Z * 4.0, Vec3::ONE - Vec3::Z * 4.0);
        assert_eq!(t, None);
    }

    #[test]
    fn origin_inside_box_reports_exit() {
        let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(t, Some(1.0));
    }

    #[test]
    fn obb_respects_rotation_scale_and_offset_center() {
        // Box scaled x2 and yawed 90°, with its local centre offset along +X,
        // which the yaw carries onto world -Z.
        let world = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::ZERO,
        );
        let obb = OrientedBox::new(world, Vec3::new(2.0, 0.0, 0.0), Vec3::splat(0.5));

        let t = ray_hits_obb(Vec3::ZERO, Vec3::NEG_Z, &obb).unwrap();
        assert!((t - 3.0).abs() < 1e-4);
    }

    #[test]
    fn pick_ray_window() {
        let ray = PickRay::from_camera(
            CameraPose {
                position: Vec3::ZERO,
                forward: Vec3::NEG_Z * 3.0,
            },
            0.1,
            10.0,
        );
        assert_eq!(ray.direction, Vec3::NEG_Z);
        assert!(ray.accepts(0.1) && ray.accepts(10.0));
        assert!(!ray.accepts(0.05) && !ray.accepts(10.5));
    }
}
