// src/ui/hotbar/mod.rs
//
// Hotbar along the bottom of the screen mirroring the inventory.

pub mod components;
pub mod systems;
