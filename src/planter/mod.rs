//! Planter pots: lifecycle state, timed growth, and their soil and plant visuals.
pub mod components;
pub mod plugin;
pub mod systems;
pub mod visuals;

pub use plugin::PlanterPlugin;
