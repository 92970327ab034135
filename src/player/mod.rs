//! Player module: viewpoint marker, look mode, and translation of raw input into gameplay messages.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
