//! Trader components and supporting resources.
use std::fmt;

use bevy::prelude::*;

/// Unique identifier for an NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Component)]
pub struct NpcId(u64);

impl NpcId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NPC-{:04}", self.0)
    }
}

/// Name shown in logs.
#[derive(Component, Debug, Clone)]
pub struct Identity {
    pub id: NpcId,
    pub display_name: String,
}

impl Identity {
    pub fn new(id: NpcId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

/// Whether a trader will currently buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TradeState {
    #[default]
    Available,
    Cooldown,
}

/// An NPC that buys herbs from the player.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Trader {
    pub interactable: bool,
    pub(crate) state: TradeState,
}

impl Trader {
    pub fn new() -> Self {
        Self {
            interactable: true,
            state: TradeState::Available,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn state(&self) -> TradeState {
        self.state
    }

    pub fn in_cooldown(&self) -> bool {
        self.state == TradeState::Cooldown
    }

    /// Interactable and not cooling down.
    pub fn can_trade(&self) -> bool {
        self.interactable && !self.in_cooldown()
    }

    pub fn begin_cooldown(&mut self) {
        self.state = TradeState::Cooldown;
    }

    /// Returns the trader to `Available`; false if it was not cooling down.
    pub fn end_cooldown(&mut self) -> bool {
        let was_cooling = self.in_cooldown();
        self.state = TradeState::Available;
        was_cooling
    }
}

impl Default for Trader {
    fn default() -> Self {
        Self::new()
    }
}

/// Resource that issues monotonically increasing NPC ids.
#[derive(Resource, Default)]
pub struct NpcIdGenerator {
    next: u64,
}

impl NpcIdGenerator {
    pub fn next_id(&mut self) -> NpcId {
        let id = self.next;
        self.next += 1;
        NpcId::new(id)
    }
}
