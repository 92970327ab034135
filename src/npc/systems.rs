//! Systems spawning traders and releasing their cooldowns.
use bevy::{
    math::primitives::{Capsule3d, Sphere},
    prelude::*,
};

use crate::{
    core::{deferred::DeferredQueue, plugin::SimulationClock},
    interaction::components::InteractionVolume,
};

use super::{
    components::{Identity, NpcIdGenerator, Trader},
    trade::CooldownExpired,
};

const BODY_RADIUS: f32 = 0.4;
const BODY_LENGTH: f32 = 1.0;
const HEAD_RADIUS: f32 = 0.3;
const EYE_RADIUS: f32 = 0.1;
const PUPIL_RADIUS: f32 = 0.04;

/// Spawns the herb traders with their body, head, and eyes.
pub fn spawn_traders(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut id_generator: ResMut<NpcIdGenerator>,
) {
    let prototypes = [
        ("Marla", Color::srgb_u8(255, 160, 122), Vec3::new(3.0, 0.0, -2.0)),
        ("Osric", Color::srgb_u8(135, 206, 235), Vec3::new(-3.5, 0.0, -7.0)),
    ];

    let body_mesh = meshes.add(Capsule3d::new(BODY_RADIUS, BODY_LENGTH));
    let head_mesh = meshes.add(Sphere::new(HEAD_RADIUS));
    let eye_mesh = meshes.add(Sphere::new(EYE_RADIUS));
    let pupil_mesh = meshes.add(Sphere::new(PUPIL_RADIUS));
    let eye_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        ..default()
    });
    let pupil_material = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        unlit: true,
        ..default()
    });

    let body_height = BODY_LENGTH + BODY_RADIUS * 2.0;
    let head_height = body_height + HEAD_RADIUS * 0.8;
    let total_height = head_height + HEAD_RADIUS;

    for (name, color, position) in prototypes {
        let id = id_generator.next_id();
        let body_material = materials.add(StandardMaterial {
            base_color: color,
            ..default()
        });

        // Turn to face the yard's centre line.
        let facing = Vec3::new(0.0, position.y, position.z);
        let transform = Transform::from_translation(position).looking_at(facing, Vec3::Y);

        commands
            .spawn((
                transform,
                Visibility::default(),
                Identity::new(id, name),
                Trader::new(),
                InteractionVolume::cuboid(
                    Vec3::Y * total_height * 0.5,
                    Vec3::new(BODY_RADIUS, total_height * 0.5, BODY_RADIUS),
                ),
                Name::new(format!("{} ({})", name, id)),
            ))
            .with_children(|npc| {
                npc.spawn((
                    Mesh3d(body_mesh.clone()),
                    MeshMaterial3d(body_material.clone()),
                    Transform::from_xyz(0.0, body_height * 0.5, 0.0),
                ));
                npc.spawn((
                    Mesh3d(head_mesh.clone()),
                    MeshMaterial3d(body_material.clone()),
                    Transform::from_xyz(0.0, head_height, 0.0),
                ))
                .with_children(|head| {
                    for side in [-1.0, 1.0] {
                        head.spawn((
                            Mesh3d(eye_mesh.clone()),
                            MeshMaterial3d(eye_material.clone()),
                            Transform::from_xyz(
                                side * HEAD_RADIUS * 0.5,
                                0.0,
                                -HEAD_RADIUS * 0.7,
                            ),
                        ))
                        .with_children(|eye| {
                            eye.spawn((
                                Mesh3d(pupil_mesh.clone()),
                                MeshMaterial3d(pupil_material.clone()),
                                Transform::from_xyz(0.0, 0.0, -EYE_RADIUS * 0.9),
                            ));
                        });
                    }
                });
            });

        info!(target: "trade", "Spawned trader {} ({}) at {:?}", name, id, position);
    }
}

/// Returns traders to `Available` once their cooldown has run out.
pub fn expire_trade_cooldowns(
    clock: Res<SimulationClock>,
    mut cooldowns: ResMut<DeferredQueue<CooldownExpired>>,
    mut traders: Query<(&mut Trader, Option<&Identity>)>,
) {
    for expired in cooldowns.drain_due(clock.now()) {
        let Ok((mut trader, identity)) = traders.get_mut(expired.npc) else {
            continue;
        };
        if trader.end_cooldown() {
            let name = identity.map_or_else(|| "trader".to_owned(), ToString::to_string);
            info!(target: "trade", "{} is buying again", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn cooldown_expires_on_the_simulation_clock() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<SimulationClock>()
            .init_resource::<DeferredQueue<CooldownExpired>>()
            .add_systems(Update, expire_trade_cooldowns);

        let mut trader = Trader::new();
        trader.begin_cooldown();
        let npc = app.world_mut().spawn(trader).id();
        app.world_mut()
            .resource_mut::<DeferredQueue<CooldownExpired>>()
            .schedule(Duration::ZERO, Duration::from_secs(10), CooldownExpired { npc });

        app.world_mut()
            .resource_mut::<SimulationClock>()
            .tick(Duration::from_secs(9));
        app.update();
        assert!(app.world().get::<Trader>(npc).is_some_and(Trader::in_cooldown));

        app.world_mut()
            .resource_mut::<SimulationClock>()
            .tick(Duration::from_secs(1));
        app.update();
        assert!(app.world().get::<Trader>(npc).is_some_and(Trader::can_trade));
        assert!(app
            .world()
            .resource::<DeferredQueue<CooldownExpired>>()
            .is_empty());
    }

    #[test]
    fn traders_spawn_with_targetable_volumes() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(Assets::<Mesh>::default())
            .insert_resource(Assets::<StandardMaterial>::default())
            .init_resource::<NpcIdGenerator>()
            .add_systems(Startup, spawn_traders);
        app.update();

        let mut query = app
            .world_mut()
            .query::<(&Trader, &InteractionVolume, &Identity)>();
        let traders: Vec<_> = query.iter(app.world()).collect();
        assert_eq!(traders.len(), 2);
        assert!(traders.iter().all(|(trader, _, _)| trader.can_trade()));
    }
}
