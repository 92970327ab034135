//! Components and resources for line-of-sight interaction.
use bevy::prelude::*;

/// Rotation of an open door around its hinge.
pub const DOOR_OPEN_ANGLE: f32 = -std::f32::consts::PI / 1.8;

/// A hinged door. The entity's transform is the hinge pivot.
#[derive(Component, Debug, Clone)]
pub struct Door {
    pub interactable: bool,
    pub open: bool,
    /// Knob entity used as the prompt anchor.
    pub handle: Option<Entity>,
}

impl Door {
    pub fn new() -> Self {
        Self {
            interactable: true,
            open: false,
            handle: None,
        }
    }

    /// Flips the door and returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn hinge_rotation(&self) -> Quat {
        if self.open {
            Quat::from_rotation_y(DOOR_OPEN_ANGLE)
        } else {
            Quat::IDENTITY
        }
    }
}

impl Default for Door {
    fn default() -> Self {
        Self::new()
    }
}

/// Marker for a door knob.
#[derive(Component, Debug, Default)]
pub struct DoorHandle;

/// Shape the targeting ray tests against, relative to the entity's transform.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum InteractionVolume {
    Box { offset: Vec3, half_extents: Vec3 },
    #[cfg_attr(not(test), allow(dead_code))]
    Sphere { offset: Vec3, radius: f32 },
}

impl InteractionVolume {
    pub fn cuboid(offset: Vec3, half_extents: Vec3) -> Self {
        Self::Box {
            offset,
            half_extents,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn sphere(offset: Vec3, radius: f32) -> Self {
        Self::Sphere { offset, radius }
    }
}

/// Which kind of world object a ray hit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitCategory {
    Door,
    Pot,
    Npc,
}

/// One intersection along the targeting ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub category: HitCategory,
    pub distance: f32,
}

/// Action available on a targeted pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PotAction {
    AddSoil,
    AddWater,
    AddSeed,
    Harvest,
    /// Growing pot with nothing to do; only its progress is shown.
    ProgressOnly,
}

impl PotAction {
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            Self::AddSoil => Some("(E): Add Soil"),
            Self::AddWater => Some("(E): Water Soil"),
            Self::AddSeed => Some("(E): Plant Seed"),
            Self::Harvest => Some("(E): Harvest"),
            Self::ProgressOnly => None,
        }
    }
}

/// What the player is looking at this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionTarget {
    #[default]
    None,
    Door(Entity),
    Pot(Entity, PotAction),
    Npc(Entity),
}

impl InteractionTarget {
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Door(_) => Some("Click to Toggle"),
            Self::Pot(_, action) => action.prompt(),
            Self::Npc(_) => Some("(E): Sell Herb"),
        }
    }

    pub fn is_actionable(self) -> bool {
        self.prompt().is_some()
    }

    pub fn entity(self) -> Option<Entity> {
        match self {
            Self::None => None,
            Self::Door(entity) | Self::Pot(entity, _) | Self::Npc(entity) => Some(entity),
        }
    }
}

/// The resolver's result from the most recent tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct CurrentTarget {
    pub target: InteractionTarget,
}

/// Per-tick UI descriptor: prompt text with its world anchor, or a growth progress value.
#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct InteractionPrompt {
    pub text: Option<&'static str>,
    pub anchor: Option<Vec3>,
    /// Percentage in `[0, 100]` for a pot that is still growing.
    pub progress: Option<f32>,
}

impl InteractionPrompt {
    pub fn is_visible(&self) -> bool {
        self.text.is_some()
    }

    pub fn hide(&mut self) {
        self.text = None;
        self.anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn door_toggle_is_a_pure_flip() {
        let mut door = Door::new();
        assert!(!door.open);
        assert!(door.toggle());
        assert_eq!(door.hinge_rotation(), Quat::from_rotation_y(DOOR_OPEN_ANGLE));
        assert!(!door.toggle());
        assert_eq!(door.hinge_rotation(), Quat::IDENTITY);
    }

    #[test]
    fn progress_only_targets_show_no_prompt() {
        let pot = World::new().spawn_empty().id();
        assert!(!InteractionTarget::Pot(pot, PotAction::ProgressOnly).is_actionable());
        assert!(InteractionTarget::Pot(pot, PotAction::Harvest).is_actionable());
        assert_eq!(InteractionTarget::None.entity(), None);
        assert_eq!(InteractionTarget::Npc(pot).entity(), Some(pot));
    }
}
