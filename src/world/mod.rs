//! World module housing environment setup and first-person camera controls.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
