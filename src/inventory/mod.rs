//! Inventory module: hotbar slots, selection, and the held item.
pub mod components;
pub mod events;
pub mod held_item;
pub mod plugin;
pub mod systems;

pub use plugin::InventoryPlugin;
