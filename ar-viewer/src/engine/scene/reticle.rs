use bevy::prelude::*;
use constants::render_settings::{RETICLE_COLOUR, RETICLE_INNER_RADIUS, RETICLE_OUTER_RADIUS};

/// Ring marking the surface point under the current view.
#[derive(Component, Debug, Default)]
pub struct ReticleGizmo;

/// Spawns the reticle hidden. The ring mesh lies in the XY plane, so it
/// is laid flat on a child; hit poses have +Y as the surface normal.
pub fn spawn_reticle(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let ring = meshes.add(Annulus::new(RETICLE_INNER_RADIUS, RETICLE_OUTER_RADIUS));
    let material = materials.add(StandardMaterial {
        base_color: RETICLE_COLOUR,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands
        .spawn((
            ReticleGizmo,
            Name::new("Reticle"),
            Transform::IDENTITY,
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(ring),
                MeshMaterial3d(material),
                Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
            ));
        })
        .id()
}
