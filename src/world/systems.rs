//! Systems for the world module.
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    math::primitives::{Cuboid, Extrusion, Plane3d, Sphere, Triangle2d},
    prelude::*,
};

use crate::{
    interaction::components::{Door, DoorHandle, InteractionVolume},
    player::components::{LookMode, Player},
    world::components::{FirstPersonCamera, House, PrimarySun},
};

const GROUND_SCALE: f32 = 100.0;
pub const EYE_HEIGHT: f32 = 1.6;
const CAMERA_START_POS: Vec3 = Vec3::new(0.0, EYE_HEIGHT, 4.0);

const HOUSE_WIDTH: f32 = 4.0;
const HOUSE_DEPTH: f32 = 5.0;
const WALL_HEIGHT: f32 = 2.5;
const WALL_THICKNESS: f32 = 0.1;
const ROOF_HEIGHT: f32 = 1.5;
const DOOR_WIDTH: f32 = 0.8;
const DOOR_HEIGHT: f32 = 1.8;
const DOOR_DEPTH: f32 = 0.05;
const KNOB_RADIUS: f32 = 0.05;

const HOUSES: [(Vec2, Color); 5] = [
    (Vec2::new(-6.0, 10.0), Color::srgb(1.0, 0.867, 0.867)),
    (Vec2::new(6.0, 15.0), Color::srgb(0.867, 1.0, 0.867)),
    (Vec2::new(-6.0, 25.0), Color::srgb(0.867, 0.867, 1.0)),
    (Vec2::new(6.0, 30.0), Color::srgb(1.0, 1.0, 0.867)),
    (Vec2::new(-6.0, -5.0), Color::srgb(1.0, 0.867, 0.933)),
];

/// Spawns the initial scene: ground plane, light, and the player's camera.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(90, 140, 90),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 20_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(16.0, 32.0, 16.0).looking_at(Vec3::ZERO, Vec3::Y),
        PrimarySun,
    ));

    let camera_transform = Transform::from_translation(CAMERA_START_POS)
        .looking_at(Vec3::new(0.0, 0.6, 0.0), Vec3::Y);
    let (yaw, pitch) = yaw_pitch_from_transform(&camera_transform);

    commands.spawn((
        Camera3d::default(),
        camera_transform,
        FirstPersonCamera::new(yaw, pitch),
        Player,
        Name::new("Player Camera"),
    ));
}

/// Spawns the village houses, each with a hinged door the player can open.
pub fn spawn_houses(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let floor_mesh = meshes.add(Cuboid::new(HOUSE_WIDTH, WALL_THICKNESS, HOUSE_DEPTH));
    let back_wall_mesh = meshes.add(Cuboid::new(HOUSE_WIDTH, WALL_HEIGHT, WALL_THICKNESS));
    let side_wall_mesh = meshes.add(Cuboid::new(WALL_THICKNESS, WALL_HEIGHT, HOUSE_DEPTH));
    let front_side_width = (HOUSE_WIDTH - DOOR_WIDTH) / 2.0;
    let front_side_mesh = meshes.add(Cuboid::new(front_side_width, WALL_HEIGHT, WALL_THICKNESS));
    let lintel_height = WALL_HEIGHT - DOOR_HEIGHT;
    let lintel_mesh = meshes.add(Cuboid::new(DOOR_WIDTH, lintel_height, WALL_THICKNESS));
    let roof_mesh = meshes.add(Extrusion::new(
        Triangle2d::new(
            Vec2::new(-HOUSE_WIDTH / 2.0, 0.0),
            Vec2::new(HOUSE_WIDTH / 2.0, 0.0),
            Vec2::new(0.0, ROOF_HEIGHT),
        ),
        HOUSE_DEPTH,
    ));
    let door_mesh = meshes.add(Cuboid::new(DOOR_WIDTH, DOOR_HEIGHT, DOOR_DEPTH));
    let knob_mesh = meshes.add(Sphere::new(KNOB_RADIUS));

    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(204, 204, 204),
        ..default()
    });
    let roof_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(139, 69, 19),
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    let door_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(101, 67, 33),
        ..default()
    });
    let knob_material = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        unlit: true,
        ..default()
    });

    let wall_y = WALL_HEIGHT / 2.0 + WALL_THICKNESS;
    let front_z = HOUSE_DEPTH / 2.0 - WALL_THICKNESS / 2.0;

    for (index, (position, color)) in HOUSES.into_iter().enumerate() {
        let wall_material = materials.add(StandardMaterial {
            base_color: color,
            double_sided: true,
            cull_mode: None,
            ..default()
        });

        let walls = [
            (
                back_wall_mesh.clone(),
                Vec3::new(0.0, wall_y, -HOUSE_DEPTH / 2.0 + WALL_THICKNESS / 2.0),
            ),
            (
                side_wall_mesh.clone(),
                Vec3::new(-HOUSE_WIDTH / 2.0 + WALL_THICKNESS / 2.0, wall_y, 0.0),
            ),
            (
                side_wall_mesh.clone(),
                Vec3::new(HOUSE_WIDTH / 2.0 - WALL_THICKNESS / 2.0, wall_y, 0.0),
            ),
            (
                front_side_mesh.clone(),
                Vec3::new(-HOUSE_WIDTH / 2.0 + front_side_width / 2.0, wall_y, front_z),
            ),
            (
                front_side_mesh.clone(),
                Vec3::new(HOUSE_WIDTH / 2.0 - front_side_width / 2.0, wall_y, front_z),
            ),
            (
                lintel_mesh.clone(),
                Vec3::new(
                    0.0,
                    WALL_HEIGHT - lintel_height / 2.0 + WALL_THICKNESS,
                    front_z,
                ),
            ),
        ];

        let house = commands
            .spawn((
                Transform::from_xyz(position.x, 0.05, position.y),
                Visibility::default(),
                House,
                Name::new(format!("House {}", index + 1)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(floor_mesh.clone()),
                    MeshMaterial3d(floor_material.clone()),
                    Transform::from_xyz(0.0, WALL_THICKNESS / 2.0, 0.0),
                ));
                for (mesh, translation) in walls {
                    parent.spawn((
                        Mesh3d(mesh),
                        MeshMaterial3d(wall_material.clone()),
                        Transform::from_translation(translation),
                    ));
                }
                parent.spawn((
                    Mesh3d(roof_mesh.clone()),
                    MeshMaterial3d(roof_material.clone()),
                    Transform::from_xyz(0.0, WALL_HEIGHT + WALL_THICKNESS, 0.0),
                ));
            })
            .id();

        // The door entity sits on the hinge; the panel and knob hang off it along +X.
        let knob = commands
            .spawn((
                Mesh3d(knob_mesh.clone()),
                MeshMaterial3d(knob_material.clone()),
                Transform::from_xyz(
                    DOOR_WIDTH - KNOB_RADIUS * 2.0,
                    0.0,
                    DOOR_DEPTH / 2.0 + KNOB_RADIUS,
                ),
                DoorHandle,
            ))
            .id();
        let panel = commands
            .spawn((
                Mesh3d(door_mesh.clone()),
                MeshMaterial3d(door_material.clone()),
                Transform::from_xyz(DOOR_WIDTH / 2.0, 0.0, 0.0),
            ))
            .id();
        let door = commands
            .spawn((
                Transform::from_xyz(
                    -DOOR_WIDTH / 2.0,
                    DOOR_HEIGHT / 2.0 + WALL_THICKNESS,
                    front_z - DOOR_DEPTH / 2.0,
                ),
                Visibility::default(),
                Door {
                    handle: Some(knob),
                    ..Door::new()
                },
                InteractionVolume::cuboid(
                    Vec3::new(DOOR_WIDTH / 2.0, 0.0, 0.0),
                    Vec3::new(DOOR_WIDTH / 2.0, DOOR_HEIGHT / 2.0, DOOR_DEPTH / 2.0),
                ),
                Name::new(format!("House {} Door", index + 1)),
            ))
            .add_children(&[panel, knob])
            .id();
        commands.entity(house).add_child(door);
    }

    info!("Spawned {} houses", HOUSES.len());
}

/// Applies mouse look to the first-person camera while look mode is engaged.
pub fn first_person_mouse_look(
    mut motion_events: MessageReader<MouseMotion>,
    look: Res<LookMode>,
    time: Res<Time>,
    mut query: Query<(&mut FirstPersonCamera, &mut Transform)>,
) {
    let mut cumulative_delta = Vec2::ZERO;
    for ev in motion_events.read() {
        cumulative_delta += ev.delta;
    }

    if !look.engaged || cumulative_delta == Vec2::ZERO {
        return;
    }

    if let Ok((mut camera, mut transform)) = query.single_mut() {
        camera.yaw -= cumulative_delta.x * camera.look_sensitivity * time.delta_secs();
        camera.pitch -= cumulative_delta.y * camera.look_sensitivity * time.delta_secs();
        camera.pitch = camera.pitch.clamp(-1.54, 1.54);

        let rotation = Quat::from_axis_angle(Vec3::Y, camera.yaw)
            * Quat::from_axis_angle(Vec3::X, camera.pitch);
        transform.rotation = rotation.normalize();
    }
}

/// Walks the camera across the ground with WASD, easing to a stop when keys are released.
pub fn first_person_walk(
    keyboard: Res<ButtonInput<KeyCode>>,
    look: Res<LookMode>,
    time: Res<Time>,
    mut query: Query<(&mut FirstPersonCamera, &mut Transform)>,
) {
    let Ok((mut camera, mut transform)) = query.single_mut() else {
        return;
    };

    let axis = |positive: &[KeyCode], negative: &[KeyCode]| -> f32 {
        let pressed = |keys: &[KeyCode]| keys.iter().any(|key| keyboard.pressed(*key));
        f32::from(u8::from(pressed(positive))) - f32::from(u8::from(pressed(negative)))
    };
    let input = if look.engaged {
        Vec2::new(
            axis(&[KeyCode::KeyD, KeyCode::ArrowRight], &[KeyCode::KeyA, KeyCode::ArrowLeft]),
            axis(&[KeyCode::KeyW, KeyCode::ArrowUp], &[KeyCode::KeyS, KeyCode::ArrowDown]),
        )
    } else {
        Vec2::ZERO
    };

    let dt = time.delta_secs();
    camera.velocity = step_walk_velocity(camera.velocity, input, camera.move_speed, camera.damping, dt);
    if camera.velocity == Vec2::ZERO {
        return;
    }

    let forward = {
        let f = transform.forward().as_vec3();
        Vec3::new(f.x, 0.0, f.z).normalize_or_zero()
    };
    let right = {
        let r = transform.right().as_vec3();
        Vec3::new(r.x, 0.0, r.z).normalize_or_zero()
    };
    transform.translation += (right * camera.velocity.x + forward * camera.velocity.y) * dt;
    transform.translation.y = EYE_HEIGHT;
}

/// Accelerates toward the input direction and applies friction.
pub fn step_walk_velocity(velocity: Vec2, input: Vec2, move_speed: f32, damping: f32, dt: f32) -> Vec2 {
    let accelerated = velocity + input.normalize_or_zero() * move_speed * dt;
    let damped = accelerated - accelerated * (damping * dt).min(1.0);
    if damped.length_squared() < 1e-6 {
        Vec2::ZERO
    } else {
        damped
    }
}

fn yaw_pitch_from_transform(transform: &Transform) -> (f32, f32) {
    let forward = transform.forward().as_vec3();
    let yaw = (-forward.x).atan2(-forward.z);
    let pitch = forward.y.asin();
    (yaw, pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_accelerates_then_coasts_to_rest() {
        let dt = 1.0 / 60.0;
        let mut velocity = Vec2::ZERO;
        for _ in 0..30 {
            velocity = step_walk_velocity(velocity, Vec2::Y, 50.0, 10.0, dt);
        }
        assert!(velocity.y > 0.0);
        assert!(velocity.x.abs() < 1e-6);
        // Terminal speed is bounded by speed / damping.
        assert!(velocity.y < 5.0);

        for _ in 0..300 {
            velocity = step_walk_velocity(velocity, Vec2::ZERO, 50.0, 10.0, dt);
        }
        assert_eq!(velocity, Vec2::ZERO);
    }

    #[test]
    fn diagonal_input_is_not_faster() {
        let straight = step_walk_velocity(Vec2::ZERO, Vec2::Y, 50.0, 10.0, 0.1);
        let diagonal = step_walk_velocity(Vec2::ZERO, Vec2::ONE, 50.0, 10.0, 0.1);
        assert!((straight.length() - diagonal.length()).abs() < 1e-5);
    }

    #[test]
    fn yaw_pitch_reproduce_the_start_orientation() {
        let transform = Transform::from_translation(CAMERA_START_POS)
            .looking_at(Vec3::new(0.0, 0.6, 0.0), Vec3::Y);
        let (yaw, pitch) = yaw_pitch_from_transform(&transform);
        let rebuilt = Quat::from_axis_angle(Vec3::Y, yaw) * Quat::from_axis_angle(Vec3::X, pitch);
        let forward = rebuilt * Vec3::NEG_Z;
        assert!(forward.distance(transform.forward().as_vec3()) < 1e-4);
    }
}
