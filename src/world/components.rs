//! Components used by the world module.
use bevy::prelude::*;

/// First-person viewpoint state: look angles and horizontal walking velocity.
#[derive(Component, Debug)]
pub struct FirstPersonCamera {
    pub yaw: f32,
    pub pitch: f32,
    /// Right (x) and forward (y) speed in world units per second.
    pub velocity: Vec2,
    pub move_speed: f32,
    pub damping: f32,
    pub look_sensitivity: f32,
}

impl FirstPersonCamera {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            velocity: Vec2::ZERO,
            move_speed: 50.0,
            damping: 10.0,
            look_sensitivity: 0.2,
        }
    }
}

/// Marker component identifying the main directional light (the "sun").
#[derive(Component, Default)]
pub struct PrimarySun;

/// Root of a house.
#[derive(Component, Debug, Default)]
pub struct House;
