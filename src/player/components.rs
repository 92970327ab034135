//! Player marker and look-mode state.
use bevy::prelude::*;

/// Marker component identifying the player entity (attached to camera).
#[derive(Component, Debug)]
pub struct Player;

/// Whether the pointer is locked for looking around. Targeting only runs while engaged.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookMode {
    pub engaged: bool,
}
