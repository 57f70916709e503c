use bevy::prelude::*;
use constants::interaction::{DEFAULT_POP_FACTOR, DEFAULT_SPIN_RADIANS_PER_SECOND};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::targets::InteractionTargets;
use super::{InteractionSettings, TargetPicked};

fn default_spin_speed() -> f32 {
    DEFAULT_SPIN_RADIANS_PER_SECOND
}

fn default_pop_factor() -> f32 {
    DEFAULT_POP_FACTOR
}

/// What picking a target does to it, besides telling the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InteractionBehaviour {
    /// Toggles a continuous turn about the target's local up axis.
    Spin {
        #[serde(default = "default_spin_speed")]
        radians_per_second: f32,
    },
    /// Toggles between the authored scale and `factor` times it.
    Pop {
        #[serde(default = "default_pop_factor")]
        factor: f32,
    },
    Notify,
}

/// Manifest entry binding one target name to a behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviourBinding {
    pub target: String,
    #[serde(flatten)]
    pub behaviour: InteractionBehaviour,
}

/// Behaviour for `name`; unlisted targets only notify.
pub fn behaviour_for(bindings: &[BehaviourBinding], name: &str) -> InteractionBehaviour {
    bindings
        .iter()
        .find(|binding| binding.target == name)
        .map(|binding| binding.behaviour)
        .unwrap_or(InteractionBehaviour::Notify)
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Spinning {
    pub radians_per_second: f32,
}

/// Present while a target is popped; remembers the scale to restore.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Popped {
    pub original: Vec3,
}

/// Toggle state of one target after the picks handled so far this update.
/// The component inserts and removals are deferred until the system ends.
#[derive(Debug, Clone, Copy)]
struct ToggleState {
    spinning: Option<Spinning>,
    popped: Option<Popped>,
}

pub fn apply_target_behaviours(
    mut commands: Commands,
    mut picks: EventReader<TargetPicked>,
    settings: Res<InteractionSettings>,
    targets: Res<InteractionTargets>,
    mut objects: Query<(Option<&Spinning>, Option<&Popped>, &mut Transform)>,
) {
    let mut toggled: HashMap<Entity, ToggleState> = HashMap::new();

    for picked in picks.read() {
        let Some(target) = targets.get(&picked.name) else {
            continue;
        };
        let Ok((spinning, popped, mut transform)) = objects.get_mut(target.entity) else {
            continue;
        };
        let state = toggled.entry(target.entity).or_insert(ToggleState {
            spinning: spinning.copied(),
            popped: popped.copied(),
        });

        match behaviour_for(&settings.behaviours, &picked.name) {
            InteractionBehaviour::Spin { radians_per_second } => {
                state.spinning = match state.spinning {
                    Some(_) => None,
                    None => Some(Spinning { radians_per_second }),
                };
            }
            InteractionBehaviour::Pop { factor } => match state.popped.take() {
                Some(popped) => transform.scale = popped.original,
                None => {
                    state.popped = Some(Popped {
                        original: transform.scale,
                    });
                    transform.scale *= factor;
                }
            },
            InteractionBehaviour::Notify => {}
        }
    }

    for (entity, state) in toggled {
        let mut entity = commands.entity(entity);
        match state.spinning {
            Some(spinning) => entity.insert(spinning),
            None => entity.remove::<Spinning>(),
        };
        match state.popped {
            Some(popped) => entity.insert(popped),
            None => entity.remove::<Popped>(),
        };
    }
}

pub fn spin_targets(time: Res<Time>, mut spinning: Query<(&Spinning, &mut Transform)>) {
    let dt = time.delta_secs();
    for (spin, mut transform) in &mut spinning {
        transform.rotate_local_y(spin.radians_per_second * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manifest_bindings() {
        let json = r#"[
            {"target": "Lamp", "action": "spin", "radians_per_second": 1.5},
            {"target": "Button", "action": "pop"},
            {"target": "Door", "action": "notify"}
        ]"#;
        let bindings: Vec<BehaviourBinding> = serde_json::from_str(json).unwrap();

        assert_eq!(
            behaviour_for(&bindings, "Lamp"),
            InteractionBehaviour::Spin {
                radians_per_second: 1.5
            }
        );
        assert_eq!(
            behaviour_for(&bindings, "Button"),
            InteractionBehaviour::Pop {
                factor: DEFAULT_POP_FACTOR
            }
        );
        assert_eq!(behaviour_for(&bindings, "Door"), InteractionBehaviour::Notify);
        assert_eq!(behaviour_for(&bindings, "Chair"), InteractionBehaviour::Notify);
    }

    fn button_app(behaviour: InteractionBehaviour) -> (App, Entity) {
        let mut app = App::new();
        app.add_event::<TargetPicked>()
            .insert_resource(InteractionSettings {
                behaviours: vec![BehaviourBinding {
                    target: "Button".into(),
                    behaviour,
                }],
                ..Default::default()
            })
            .add_systems(Update, apply_target_behaviours);
        let button = app
            .world_mut()
            .spawn(Transform::from_scale(Vec3::splat(2.0)))
            .id();
        let (targets, _) =
            InteractionTargets::resolve(&["Button".to_string()], vec![("Button", button)]);
        app.insert_resource(targets);
        (app, button)
    }

    fn pop_app(factor: f32) -> (App, Entity) {
        button_app(InteractionBehaviour::Pop { factor })
    }

    /// Queues `count` picks of the button and runs a single update.
    fn pick_button_times(app: &mut App, count: usize) {
        for _ in 0..count {
            app.world_mut().send_event(TargetPicked {
                name: "Button".into(),
            });
        }
        app.update();
    }

    fn pick_button(app: &mut App) {
        pick_button_times(app, 1);
    }

    fn scale(app: &App, button: Entity) -> Vec3 {
        app.world().get::<Transform>(button).unwrap().scale
    }

    #[test]
    fn pop_toggles_between_authored_and_scaled_size() {
        let (mut app, button) = pop_app(1.5);

        pick_button(&mut app);
        assert_eq!(scale(&app, button), Vec3::splat(3.0));
        assert!(app.world().get::<Popped>(button).is_some());

        pick_button(&mut app);
        assert_eq!(scale(&app, button), Vec3::splat(2.0));
        assert!(app.world().get::<Popped>(button).is_none());
    }

    #[test]
    fn two_pops_in_one_update_restore_authored_size() {
        let (mut app, button) = pop_app(1.5);

        pick_button_times(&mut app, 2);
        assert_eq!(scale(&app, button), Vec3::splat(2.0));
        assert!(app.world().get::<Popped>(button).is_none());

        // Later picks still toggle against the authored scale.
        pick_button(&mut app);
        assert_eq!(scale(&app, button), Vec3::splat(3.0));
        pick_button(&mut app);
        assert_eq!(scale(&app, button), Vec3::splat(2.0));
    }

    #[test]
    fn three_pops_in_one_update_remember_authored_size() {
        let (mut app, button) = pop_app(1.5);

        pick_button_times(&mut app, 3);
        assert_eq!(scale(&app, button), Vec3::splat(3.0));
        assert_eq!(
            app.world().get::<Popped>(button),
            Some(&Popped {
                original: Vec3::splat(2.0)
            })
        );
    }

    #[test]
    fn two_spins_in_one_update_cancel_out() {
        let (mut app, button) = button_app(InteractionBehaviour::Spin {
            radians_per_second: 1.0,
        });

        pick_button_times(&mut app, 2);
        assert!(app.world().get::<Spinning>(button).is_none());

        pick_button(&mut app);
        assert_eq!(
            app.world().get::<Spinning>(button),
            Some(&Spinning {
                radians_per_second: 1.0
            })
        );
    }
}
