//! Targeting ray tests against interaction volumes.
use bevy::{
    math::{
        bounding::{Aabb3d, BoundingSphere, RayCast3d},
        Mat3A, Vec3A,
    },
    prelude::*,
};

use super::components::{HitCategory, InteractionVolume, RayHit};

/// Distance along the ray to `volume`, if it is hit within the cast's range.
pub fn intersect_volume(
    cast: &RayCast3d,
    transform: &GlobalTransform,
    volume: &InteractionVolume,
) -> Option<f32> {
    match *volume {
        InteractionVolume::Box {
            offset,
            half_extents,
        } => {
            let center = transform.transform_point(offset);
            let linear = transform.affine().matrix3;
            let absolute = Mat3A::from_cols(
                linear.x_axis.abs(),
                linear.y_axis.abs(),
                linear.z_axis.abs(),
            );
            let world_half_extents = absolute * Vec3A::from(half_extents);
            cast.aabb_intersection_at(&Aabb3d::new(center, world_half_extents))
        }
        InteractionVolume::Sphere { offset, radius } => {
            let center = transform.transform_point(offset);
            let scale = transform.scale().abs().max_element();
            cast.sphere_intersection_at(&BoundingSphere::new(center, radius * scale))
        }
    }
}

/// Casts one ray and returns every hit volume within `max_distance`, nearest first.
pub fn cast_ray<'a>(
    origin: Vec3,
    direction: Dir3,
    max_distance: f32,
    candidates: impl IntoIterator<Item = (Entity, HitCategory, &'a GlobalTransform, &'a InteractionVolume)>,
) -> Vec<RayHit> {
    let cast = RayCast3d::from_ray(Ray3d::new(origin, direction), max_distance);

    let mut hits: Vec<RayHit> = candidates
        .into_iter()
        .filter_map(|(entity, category, transform, volume)| {
            intersect_volume(&cast, transform, volume).map(|distance| RayHit {
                entity,
                category,
                distance,
            })
        })
        .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_hits_nearest_first_within_range() {
        let mut world = World::new();
        let near = world.spawn_empty().id();
        let far = world.spawn_empty().id();
        let out_of_range = world.spawn_empty().id();
        let beside = world.spawn_empty().id();

        let near_tf = GlobalTransform::from_translation(Vec3::new(0.0, 0.0, -2.0));
        let far_tf = GlobalTransform::from_translation(Vec3::new(0.0, 0.0, -4.0));
        let out_tf = GlobalTransform::from_translation(Vec3::new(0.0, 0.0, -9.0));
        let beside_tf = GlobalTransform::from_translation(Vec3::new(3.0, 0.0, -2.0));
        let cube = InteractionVolume::cuboid(Vec3::ZERO, Vec3::splat(0.5));
        let ball = InteractionVolume::sphere(Vec3::ZERO, 0.5);

        let hits = cast_ray(
            Vec3::ZERO,
            Dir3::NEG_Z,
            5.0,
            [
                (far, HitCategory::Npc, &far_tf, &ball),
                (out_of_range, HitCategory::Pot, &out_tf, &cube),
                (beside, HitCategory::Pot, &beside_tf, &cube),
                (near, HitCategory::Door, &near_tf, &cube),
            ],
        );

        let order: Vec<_> = hits.iter().map(|hit| hit.entity).collect();
        assert_eq!(order, vec![near, far]);
        assert!((hits[0].distance - 1.5).abs() < 1e-4);
        assert!((hits[1].distance - 3.5).abs() < 1e-4);
    }

    #[test]
    fn box_offsets_follow_rotation() {
        // Panel extends along +X from its hinge; a quarter turn swings it to -Z.
        let volume = InteractionVolume::cuboid(Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.5, 1.0, 0.05));
        let hinge = GlobalTransform::from(
            Transform::from_xyz(0.0, 0.0, -3.0)
                .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
        );
        let cast = RayCast3d::from_ray(
            Ray3d::new(Vec3::new(0.0, 0.0, 0.0), Dir3::NEG_Z),
            10.0,
        );
        let distance = intersect_volume(&cast, &hinge, &volume).expect("rotated panel hit");
        assert!((distance - 3.0).abs() < 1e-3);
    }
}
