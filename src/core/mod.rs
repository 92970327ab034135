//! Core module: simulation clock, tick ordering, deferred timers, and settings.
pub mod assets;
pub mod config;
pub mod deferred;
pub mod plugin;

pub use plugin::CorePlugin;
