//! Herb traders: identity, sale state, and cooldown release.
pub mod components;
pub mod plugin;
pub mod systems;
pub mod trade;

pub use plugin::NpcPlugin;
