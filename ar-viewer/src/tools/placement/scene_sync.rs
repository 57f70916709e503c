use bevy::prelude::*;

use super::controller::PlacementController;
use crate::engine::scene::{PlacedSceneRoot, ReticleGizmo};

fn visibility_of(visible: bool) -> Visibility {
    if visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

pub fn sync_reticle_gizmo(
    controller: Res<PlacementController>,
    mut reticles: Query<(&mut Transform, &mut Visibility), With<ReticleGizmo>>,
) {
    if !controller.is_changed() {
        return;
    }
    let Ok((mut transform, mut visibility)) = reticles.single_mut() else {
        return;
    };

    let reticle = controller.reticle();
    if reticle.visible {
        *transform = controller.reticle_transform();
    }
    *visibility = visibility_of(reticle.visible);
}

pub fn sync_placed_scene_root(
    controller: Res<PlacementController>,
    mut roots: Query<(&mut Transform, &mut Visibility), With<PlacedSceneRoot>>,
) {
    if !controller.is_changed() {
        return;
    }
    let Ok((mut transform, mut visibility)) = roots.single_mut() else {
        return;
    };

    let root = controller.placed_root();
    if root.visible {
        *transform = root.transform;
    }
    *visibility = visibility_of(root.visible);
}
