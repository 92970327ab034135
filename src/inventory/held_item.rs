//! Keeps the item shown in the player's hand in step with the selected slot.
use bevy::{
    ecs::world::FromWorld,
    math::primitives::{Cuboid, Cylinder, Sphere},
    prelude::*,
};

use crate::player::components::Player;

use super::components::{Inventory, SEED_VIAL_SLOT, SOIL_SLOT, WATERING_CAN_SLOT};

/// Offset from the viewpoint: right, down, and forward of the camera centre.
const HELD_ITEM_OFFSET: Vec3 = Vec3::new(0.3, -0.3, -0.5);

/// Visual held in front of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeldItemKind {
    #[default]
    None,
    Soil,
    WateringCan,
    SeedVial,
}

impl HeldItemKind {
    /// Slots 0-2 hold tools; anything else leaves the hand empty.
    pub fn from_selection(selected: Option<usize>) -> Self {
        match selected {
            Some(SOIL_SLOT) => Self::Soil,
            Some(WATERING_CAN_SLOT) => Self::WateringCan,
            Some(SEED_VIAL_SLOT) => Self::SeedVial,
            _ => Self::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "empty hand",
            Self::Soil => "soil bag",
            Self::WateringCan => "watering can",
            Self::SeedVial => "seed vial",
        }
    }
}

/// Marker for the held-item visual parented to the camera.
#[derive(Component, Debug)]
pub struct HeldItemVisual {
    pub kind: HeldItemKind,
}

/// The kind currently shown and the entity showing it.
#[derive(Resource, Debug, Default)]
pub struct HeldItemState {
    kind: HeldItemKind,
    visual: Option<Entity>,
}

impl HeldItemState {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn visual(&self) -> Option<Entity> {
        self.visual
    }
}

struct HeldItemParts {
    body: (Handle<Mesh>, Handle<StandardMaterial>, Transform),
    detail: Option<(Handle<Mesh>, Handle<StandardMaterial>, Transform)>,
}

/// Shared meshes and materials for each held item.
#[derive(Resource)]
pub struct HeldItemVisuals {
    soil: HeldItemParts,
    watering_can: HeldItemParts,
    seed_vial: HeldItemParts,
}

impl HeldItemVisuals {
    fn parts(&self, kind: HeldItemKind) -> Option<&HeldItemParts> {
        match kind {
            HeldItemKind::None => None,
            HeldItemKind::Soil => Some(&self.soil),
            HeldItemKind::WateringCan => Some(&self.watering_can),
            HeldItemKind::SeedVial => Some(&self.seed_vial),
        }
    }
}

impl FromWorld for HeldItemVisuals {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        let soil_mesh = meshes.add(Cuboid::new(0.2, 0.3, 0.15));
        let can_mesh = meshes.add(Cylinder::new(0.11, 0.25));
        let spout_mesh = meshes.add(Cylinder::new(0.02, 0.2));
        let vial_mesh = meshes.add(Cylinder::new(0.03, 0.15));
        let seed_mesh = meshes.add(Sphere::new(0.015));

        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        let soil_material = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(139, 69, 19),
            perceptual_roughness: 1.0,
            ..default()
        });
        let can_material = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(170, 170, 170),
            metallic: 0.6,
            ..default()
        });
        let spout_material = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(153, 153, 153),
            metallic: 0.6,
            ..default()
        });
        let vial_material = materials.add(StandardMaterial {
            base_color: Color::srgba_u8(224, 255, 255, 178),
            alpha_mode: AlphaMode::Blend,
            ..default()
        });
        let seed_material = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(58, 36, 20),
            unlit: true,
            ..default()
        });

        Self {
            soil: HeldItemParts {
                body: (
                    soil_mesh,
                    soil_material,
                    Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, 0.0, -0.3, 0.1)),
                ),
                detail: None,
            },
            watering_can: HeldItemParts {
                body: (
                    can_mesh,
                    can_material,
                    Transform::from_rotation(Quat::from_euler(
                        EulerRot::XYZ,
                        0.1,
                        std::f32::consts::FRAC_PI_2 - 0.2,
                        -0.1,
                    )),
                ),
                detail: Some((
                    spout_mesh,
                    spout_material,
                    Transform::from_xyz(0.1, 0.05, 0.0)
                        .with_rotation(Quat::from_rotation_z(-std::f32::consts::FRAC_PI_4)),
                )),
            },
            seed_vial: HeldItemParts {
                body: (
                    vial_mesh,
                    vial_material,
                    Transform::from_rotation(Quat::from_rotation_z(0.1)),
                ),
                detail: Some((seed_mesh, seed_material, Transform::from_xyz(0.0, -0.04, 0.0))),
            },
        }
    }
}

/// Swaps the held-item visual whenever the selected slot maps to a different kind.
pub fn sync_held_item(
    mut commands: Commands,
    inventory: Res<Inventory>,
    visuals: Res<HeldItemVisuals>,
    mut state: ResMut<HeldItemState>,
    viewpoint: Query<Entity, With<Player>>,
) {
    let kind = inventory.held_item();
    let attached = state.visual.is_some();
    if kind == state.kind && attached == (kind != HeldItemKind::None) {
        return;
    }

    if let Some(previous) = state.visual.take() {
        commands.entity(previous).despawn();
    }
    state.kind = kind;

    let Some(parts) = visuals.parts(kind) else {
        debug!(target: "inventory", "Hand emptied");
        return;
    };
    let Ok(camera) = viewpoint.single() else {
        warn!(target: "inventory", "No viewpoint to attach {} to", kind.label());
        return;
    };

    let (mesh, material, transform) = &parts.body;
    let visual = commands
        .spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            transform.with_translation(HELD_ITEM_OFFSET),
            HeldItemVisual { kind },
            Name::new(format!("Held {}", kind.label())),
        ))
        .id();

    if let Some((detail_mesh, detail_material, detail_transform)) = &parts.detail {
        commands.entity(visual).with_children(|item| {
            item.spawn((
                Mesh3d(detail_mesh.clone()),
                MeshMaterial3d(detail_material.clone()),
                *detail_transform,
            ));
        });
    }

    commands.entity(camera).add_child(visual);
    state.visual = Some(visual);
    debug!(target: "inventory", "Holding {}", kind.label());
}
