//! Inventory input messages.
use bevy::prelude::Message;

/// A hotbar key was pressed; `index` is zero-based.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotKeyPressed {
    pub index: usize,
}
