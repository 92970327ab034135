// src/ui/mod.rs
//
// UI module providing the screen-space HUD:
// - Hotbar (bottom row mirroring the inventory)
// - Interaction prompt (label and growth bar over the current target)

pub mod hotbar;
pub mod plugin;
pub mod prompt;

// Re-export the main plugin
pub use plugin::UiPlugin;
