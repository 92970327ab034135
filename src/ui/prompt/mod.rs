// src/ui/prompt/mod.rs
//
// Screen-space prompt that follows the current interaction target.

pub mod components;
pub mod systems;
