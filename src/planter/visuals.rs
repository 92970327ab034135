//! Shared meshes and materials for pots, soil, and plants.
use bevy::{
    ecs::world::FromWorld,
    math::primitives::{ConicalFrustum, Cylinder, Sphere},
    prelude::*,
};

use super::components::GrowthStage;

pub const POT_HEIGHT: f32 = 0.5;
pub const POT_RADIUS_TOP: f32 = 0.4;
const POT_RADIUS_BOTTOM: f32 = 0.3;
// Local to the pot, whose origin sits at half its height.
const SOIL_LEVEL: f32 = POT_HEIGHT * 0.5 - 0.06;

/// Soil disc inside a pot.
#[derive(Component, Debug)]
pub struct SoilVisual;

/// Plant mesh for one growth stage.
#[derive(Component, Debug)]
pub struct PlantVisual {
    pub stage: GrowthStage,
}

#[derive(Clone)]
pub struct StageModel {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub transform: Transform,
}

#[derive(Resource)]
pub struct PlanterVisuals {
    pub pot_mesh: Handle<Mesh>,
    pub pot_material: Handle<StandardMaterial>,
    pub soil_mesh: Handle<Mesh>,
    pub dry_soil: Handle<StandardMaterial>,
    pub wet_soil: Handle<StandardMaterial>,
    stages: [StageModel; 3],
}

impl PlanterVisuals {
    pub fn soil_material(&self, watered: bool) -> Handle<StandardMaterial> {
        if watered {
            self.wet_soil.clone()
        } else {
            self.dry_soil.clone()
        }
    }

    pub fn soil_transform(&self) -> Transform {
        Transform::from_xyz(0.0, SOIL_LEVEL, 0.0)
    }

    pub fn stage(&self, stage: GrowthStage) -> &StageModel {
        &self.stages[usize::from(stage.index())]
    }
}

impl FromWorld for PlanterVisuals {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        let pot_mesh = meshes.add(ConicalFrustum {
            radius_top: POT_RADIUS_TOP,
            radius_bottom: POT_RADIUS_BOTTOM,
            height: POT_HEIGHT,
        });
        let soil_mesh = meshes.add(Cylinder::new(POT_RADIUS_TOP - 0.05, 0.04));
        let seedling_mesh = meshes.add(Sphere::new(0.06));
        let sprout_mesh = meshes.add(Cylinder::new(0.025, 0.3));
        let bush_mesh = meshes.add(Sphere::new(0.3));

        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        let pot_material = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(160, 82, 45),
            double_sided: true,
            cull_mode: None,
            ..default()
        });
        let dry_soil = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(139, 69, 19),
            perceptual_roughness: 1.0,
            ..default()
        });
        let wet_soil = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(74, 44, 22),
            perceptual_roughness: 0.6,
            ..default()
        });
        let seedling_material = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(144, 238, 144),
            ..default()
        });
        let sprout_material = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(50, 205, 50),
            ..default()
        });
        let bush_material = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(34, 139, 34),
            ..default()
        });

        Self {
            pot_mesh,
            pot_material,
            soil_mesh,
            dry_soil,
            wet_soil,
            stages: [
                StageModel {
                    mesh: seedling_mesh,
                    material: seedling_material,
                    transform: Transform::from_xyz(0.0, SOIL_LEVEL + 0.05, 0.0),
                },
                StageModel {
                    mesh: sprout_mesh,
                    material: sprout_material,
                    transform: Transform::from_xyz(0.0, SOIL_LEVEL + 0.15, 0.0),
                },
                StageModel {
                    mesh: bush_mesh,
                    material: bush_material,
                    transform: Transform::from_xyz(0.0, SOIL_LEVEL + 0.3, 0.0)
                        .with_scale(Vec3::new(1.0, 0.8, 1.0)),
                },
            ],
        }
    }
}
