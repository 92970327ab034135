//! Particle bursts and highlight rings shown around a completed sale.
use std::time::Duration;

use bevy::{
    ecs::world::FromWorld,
    math::primitives::{Cuboid, Sphere, Torus},
    prelude::*,
};
use rand::Rng;

use crate::{
    core::{config::GameplaySettings, plugin::SimulationClock},
    interaction::dispatcher::{ActionCommitted, CommittedAction},
    player::components::Player,
};

const CASH_PARTICLES: usize = 20;
const SMOKE_PARTICLES: usize = 50;
const CASH_ALPHA: f32 = 0.9;
const SMOKE_ALPHA: f32 = 0.6;
const CASH_HEIGHT: f32 = 1.5;
const SMOKE_HEIGHT: f32 = 2.2;
/// Upward velocity lost per second by rising smoke.
const SMOKE_DRAG: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BurstKind {
    /// Particles fly from their start towards `target`.
    Cash { target: Vec3 },
    /// Particles drift on their own velocity.
    Smoke,
}

/// Root of one short-lived particle effect. Particles are its children, in world space.
#[derive(Component, Debug)]
pub struct ParticleBurst {
    pub kind: BurstKind,
    timer: Timer,
    base_alpha: f32,
    material: Handle<StandardMaterial>,
}

impl ParticleBurst {
    pub fn progress(&self) -> f32 {
        self.timer.fraction()
    }
}

#[derive(Component, Debug)]
pub struct CashParticle {
    pub start: Vec3,
}

#[derive(Component, Debug)]
pub struct SmokeParticle {
    pub velocity: Vec3,
}

/// Ring flashed under a trader after a sale.
#[derive(Component, Debug)]
pub struct Highlight {
    timer: Timer,
}

#[derive(Resource)]
pub struct EffectAssets {
    cash_mesh: Handle<Mesh>,
    smoke_mesh: Handle<Mesh>,
    ring_mesh: Handle<Mesh>,
    ring_material: Handle<StandardMaterial>,
}

impl FromWorld for EffectAssets {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        let cash_mesh = meshes.add(Cuboid::new(0.08, 0.08, 0.01));
        let smoke_mesh = meshes.add(Sphere::new(0.05));
        let ring_mesh = meshes.add(Torus::new(0.55, 0.65));

        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        let ring_material = materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 0.85, 0.2, 0.8),
            emissive: LinearRgba::rgb(1.0, 0.8, 0.1),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });

        Self {
            cash_mesh,
            smoke_mesh,
            ring_mesh,
            ring_material,
        }
    }
}

/// Opacity of a burst at `progress` through its lifetime.
pub fn faded_alpha(base_alpha: f32, progress: f32) -> f32 {
    base_alpha * (1.0 - progress.clamp(0.0, 1.0))
}

/// Starts cash, smoke, and highlight effects at every trader that just bought a herb.
pub fn spawn_sale_effects(
    mut commands: Commands,
    mut committed: MessageReader<ActionCommitted>,
    settings: Res<GameplaySettings>,
    assets: Res<EffectAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    transforms: Query<&GlobalTransform>,
    viewpoint: Query<&GlobalTransform, With<Player>>,
) {
    let mut rng = rand::thread_rng();

    for event in committed.read() {
        if !matches!(event.action, CommittedAction::Sold { .. }) {
            continue;
        }
        let Ok(npc) = transforms.get(event.entity) else {
            debug!("Trader {:?} vanished before its sale effects", event.entity);
            continue;
        };
        let base = npc.translation();
        let cash_start = base + Vec3::Y * CASH_HEIGHT;
        let target = viewpoint
            .single()
            .map(GlobalTransform::translation)
            .unwrap_or(cash_start + Vec3::Y);

        let cash_material = materials.add(StandardMaterial {
            base_color: Color::srgba(0.0, 1.0, 0.0, CASH_ALPHA),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        commands
            .spawn((
                Transform::IDENTITY,
                Visibility::default(),
                ParticleBurst {
                    kind: BurstKind::Cash { target },
                    timer: Timer::new(settings.feedback.cash_effect, TimerMode::Once),
                    base_alpha: CASH_ALPHA,
                    material: cash_material.clone(),
                },
                Name::new("Cash Burst"),
            ))
            .with_children(|burst| {
                for _ in 0..CASH_PARTICLES {
                    let start = cash_start
                        + Vec3::new(
                            rng.gen_range(-0.05..0.05),
                            rng.gen_range(-0.05..0.05),
                            rng.gen_range(-0.05..0.05),
                        );
                    burst.spawn((
                        Mesh3d(assets.cash_mesh.clone()),
                        MeshMaterial3d(cash_material.clone()),
                        Transform::from_translation(start),
                        CashParticle { start },
                    ));
                }
            });

        let smoke_start = base + Vec3::Y * SMOKE_HEIGHT;
        let smoke_material = materials.add(StandardMaterial {
            base_color: Color::srgba(0.667, 0.667, 0.667, SMOKE_ALPHA),
            alpha_mode: AlphaMode::Add,
            unlit: true,
            ..default()
        });
        commands
            .spawn((
                Transform::IDENTITY,
                Visibility::default(),
                ParticleBurst {
                    kind: BurstKind::Smoke,
                    timer: Timer::new(settings.feedback.smoke_effect, TimerMode::Once),
                    base_alpha: SMOKE_ALPHA,
                    material: smoke_material.clone(),
                },
                Name::new("Smoke Burst"),
            ))
            .with_children(|burst| {
                for _ in 0..SMOKE_PARTICLES {
                    let velocity = Vec3::new(
                        rng.gen_range(-0.1..0.1),
                        rng.gen_range(0.3..0.8),
                        rng.gen_range(-0.1..0.1),
                    );
                    burst.spawn((
                        Mesh3d(assets.smoke_mesh.clone()),
                        MeshMaterial3d(smoke_material.clone()),
                        Transform::from_translation(smoke_start),
                        SmokeParticle { velocity },
                    ));
                }
            });

        commands.spawn((
            Mesh3d(assets.ring_mesh.clone()),
            MeshMaterial3d(assets.ring_material.clone()),
            Transform::from_translation(base + Vec3::Y * 0.05),
            Highlight {
                timer: Timer::new(settings.feedback.highlight, TimerMode::Once),
            },
            Name::new("Trader Highlight"),
        ));
    }
}

/// Moves and fades particles, despawning each burst when its time is up.
#[allow(clippy::type_complexity)]
pub fn animate_particle_bursts(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut bursts: Query<(Entity, &mut ParticleBurst, Option<&Children>)>,
    mut cash: Query<(&CashParticle, &mut Transform), Without<SmokeParticle>>,
    mut smoke: Query<(&mut SmokeParticle, &mut Transform), Without<CashParticle>>,
) {
    let delta = clock.last_scaled_delta();
    let dt = delta.as_secs_f32();

    for (entity, mut burst, children) in &mut bursts {
        burst.timer.tick(delta);
        if burst.timer.is_finished() {
            materials.remove(&burst.material);
            commands.entity(entity).despawn();
            continue;
        }

        let progress = burst.progress();
        if let Some(material) = materials.get_mut(&burst.material) {
            material
                .base_color
                .set_alpha(faded_alpha(burst.base_alpha, progress));
        }

        let Some(children) = children else {
            continue;
        };
        let children: &[Entity] = children;
        for &child in children {
            match burst.kind {
                BurstKind::Cash { target } => {
                    if let Ok((particle, mut transform)) = cash.get_mut(child) {
                        transform.translation = particle.start.lerp(target, progress);
                    }
                }
                BurstKind::Smoke => {
                    if let Ok((mut particle, mut transform)) = smoke.get_mut(child) {
                        transform.translation += particle.velocity * dt;
                        particle.velocity.y -= SMOKE_DRAG * dt;
                    }
                }
            }
        }
    }
}

pub fn fade_highlights(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    mut highlights: Query<(Entity, &mut Highlight, &mut Transform)>,
) {
    for (entity, mut highlight, mut transform) in &mut highlights {
        highlight.timer.tick(clock.last_scaled_delta());
        if highlight.timer.is_finished() {
            commands.entity(entity).despawn();
            continue;
        }
        let pulse = 1.0 + 0.2 * (highlight.timer.fraction() * std::f32::consts::PI).sin();
        transform.scale = Vec3::new(pulse, 1.0, pulse);
    }
}
