use bevy::prelude::*;
use bevy::render::primitives::Aabb;

use super::ray::OrientedBox;
use super::raycaster::{TargetVolume, pick};
use super::targets::InteractionTargets;
use super::{InteractionSettings, TargetPicked};
use crate::engine::camera::{CameraPose, XrCamera};
use crate::engine::scene::PlacedSceneRoot;
use crate::tools::placement::{PlacementController, PlacementTransition};

/// One discrete select gesture (screen tap or controller trigger).
#[derive(Event, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectGesture;

/// What a select gesture is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectRoute {
    Place,
    Pick,
}

/// Both things a select gesture can do, behind the placement flag.
pub trait SelectTarget {
    fn has_placed(&self) -> bool;
    fn place(&mut self);
    fn pick(&mut self);
}

/// Routes one gesture. The placement flag is read once, so a gesture that
/// places the scene can never also pick.
pub fn on_select(target: &mut impl SelectTarget) -> SelectRoute {
    if target.has_placed() {
        target.pick();
        SelectRoute::Pick
    } else {
        target.place();
        SelectRoute::Place
    }
}

/// Select handling against live ECS state. `volumes` is only evaluated
/// when a pick actually happens, and is given the placed root's current
/// matrix.
struct SelectDispatch<'a, F: FnMut(Mat4) -> Vec<TargetVolume>> {
    controller: &'a mut PlacementController,
    camera: CameraPose,
    volumes: F,
    near: f32,
    far: f32,
    transition: Option<PlacementTransition>,
    picked: Option<String>,
}

impl<F: FnMut(Mat4) -> Vec<TargetVolume>> SelectTarget for SelectDispatch<'_, F> {
    fn has_placed(&self) -> bool {
        self.controller.has_placed()
    }

    fn place(&mut self) {
        self.transition = self.controller.place(self.camera.position);
    }

    fn pick(&mut self) {
        let root = *self.controller.placed_root();
        let volumes = (self.volumes)(root.transform.compute_matrix());
        let root_visible = root.visible;
        self.picked =
            pick(self.camera, root_visible, &volumes, self.near, self.far).map(str::to_owned);
    }
}

/// Maps the scene as last propagated onto the root's placed pose.
///
/// The root `Transform` is synced after input handling and propagated in
/// `PostUpdate`, so a pick in the same update as the placing gesture still
/// sees the old `GlobalTransform`s. Identity once the two agree, or when
/// there is no usable root.
pub fn reanchor_to_placed_root(placed: Mat4, propagated: Option<Mat4>) -> Mat4 {
    match propagated {
        Some(propagated) if propagated.determinant().abs() > f32::EPSILON => {
            placed * propagated.inverse()
        }
        _ => Mat4::IDENTITY,
    }
}

/// Collects the world-space boxes of every mesh at or below each target,
/// with `anchor` applied on top of their propagated transforms.
pub fn target_volumes(
    targets: &InteractionTargets,
    children: &Query<&Children>,
    meshes: &Query<(&GlobalTransform, &Aabb)>,
    anchor: Mat4,
) -> Vec<TargetVolume> {
    targets
        .iter()
        .map(|target| {
            let boxes = std::iter::once(target.entity)
                .chain(children.iter_descendants(target.entity))
                .filter_map(|entity| meshes.get(entity).ok())
                .map(|(transform, aabb)| {
                    OrientedBox::new(
                        anchor * transform.compute_matrix(),
                        Vec3::from(aabb.center),
                        Vec3::from(aabb.half_extents),
                    )
                })
                .collect();
            TargetVolume::new(target.name.clone(), boxes)
        })
        .collect()
}

/// Applies select gestures in arrival order. The camera pose is read from
/// its local transform so a pose applied earlier this update is honoured.
#[allow(clippy::too_many_arguments)]
pub fn handle_select_gestures(
    mut gestures: EventReader<SelectGesture>,
    mut controller: ResMut<PlacementController>,
    cameras: Query<&Transform, With<XrCamera>>,
    targets: Res<InteractionTargets>,
    settings: Res<InteractionSettings>,
    children: Query<&Children>,
    meshes: Query<(&GlobalTransform, &Aabb)>,
    roots: Query<&GlobalTransform, With<PlacedSceneRoot>>,
    mut transitions: EventWriter<PlacementTransition>,
    mut picks: EventWriter<TargetPicked>,
) {
    for _ in gestures.read() {
        let Ok(camera) = cameras.single() else {
            warn!("Select ignored: no XR camera");
            continue;
        };

        let mut dispatch = SelectDispatch {
            controller: &mut *controller,
            camera: CameraPose::from_transform(camera),
            volumes: |placed: Mat4| {
                let propagated = roots.single().ok().map(GlobalTransform::compute_matrix);
                let anchor = reanchor_to_placed_root(placed, propagated);
                target_volumes(&targets, &children, &meshes, anchor)
            },
            near: settings.near,
            far: settings.far,
            transition: None,
            picked: None,
        };
        let route = on_select(&mut dispatch);
        debug!("Select routed to {:?}", route);

        if let Some(transition) = dispatch.transition {
            transitions.write(transition);
        }
        match dispatch.picked {
            Some(name) => {
                info!("Picked target {}", name);
                picks.write(TargetPicked { name });
            }
            None if route == SelectRoute::Pick => info!("Picked target none"),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        placed: bool,
        place_calls: u32,
        pick_calls: u32,
        // Simulates a place() that fails its precondition.
        surface_tracked: bool,
    }

    impl SelectTarget for Recorder {
        fn has_placed(&self) -> bool {
            self.placed
        }

        fn place(&mut self) {
            self.place_calls += 1;
            if self.surface_tracked {
                self.placed = true;
            }
        }

        fn pick(&mut self) {
            self.pick_calls += 1;
        }
    }

    #[test]
    fn placing_gesture_does_not_also_pick() {
        let mut target = Recorder {
            surface_tracked: true,
            ..Default::default()
        };

        assert_eq!(on_select(&mut target), SelectRoute::Place);
        assert!(target.placed);
        assert_eq!((target.place_calls, target.pick_calls), (1, 0));
    }

    #[test]
    fn after_placement_every_gesture_picks() {
        let mut target = Recorder {
            surface_tracked: true,
            ..Default::default()
        };
        on_select(&mut target);

        for _ in 0..3 {
            assert_eq!(on_select(&mut target), SelectRoute::Pick);
        }
        assert_eq!((target.place_calls, target.pick_calls), (1, 3));
    }

    #[test]
    fn reanchor_is_identity_once_root_is_propagated() {
        let placed = Transform::from_xyz(1.0, 0.0, -2.0)
            .with_scale(Vec3::splat(0.5))
            .compute_matrix();

        let anchor = reanchor_to_placed_root(placed, Some(placed));
        assert!(anchor.abs_diff_eq(Mat4::IDENTITY, 1e-5));
        assert_eq!(reanchor_to_placed_root(placed, None), Mat4::IDENTITY);
        assert_eq!(
            reanchor_to_placed_root(placed, Some(Mat4::ZERO)),
            Mat4::IDENTITY
        );
    }

    #[test]
    fn reanchor_moves_unpropagated_scene_onto_placed_pose() {
        let placed = Transform::from_xyz(1.0, 0.0, -2.0)
            .with_scale(Vec3::splat(0.5))
            .compute_matrix();

        let anchor = reanchor_to_placed_root(placed, Some(Mat4::IDENTITY));
        let child = anchor.transform_point3(Vec3::new(0.0, 0.0, -1.0));
        assert!(child.abs_diff_eq(Vec3::new(1.0, 0.0, -2.5), 1e-5));
    }

    #[test]
    fn failed_place_keeps_routing_to_place() {
        let mut target = Recorder::default();

        on_select(&mut target);
        on_select(&mut target);

        assert!(!target.placed);
        assert_eq!((target.place_calls, target.pick_calls), (2, 0));
    }
}
