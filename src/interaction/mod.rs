//! Interaction module: viewpoint ray casting, target resolution, and action dispatch.
pub mod components;
pub mod dispatcher;
pub mod errors;
pub mod plugin;
pub mod raycast;
pub mod resolver;

pub use plugin::InteractionPlugin;
