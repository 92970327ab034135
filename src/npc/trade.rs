//! Herb sales and trader cooldowns.
use std::{fmt, time::Duration};

use bevy::prelude::*;

use crate::{
    core::{config::TradeRules, deferred::DeferredQueue},
    inventory::components::{Inventory, InventoryError, CASH_SLOT, HERB_SLOT},
};

use super::components::Trader;

/// Deferred release of a trader back to `Available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownExpired {
    pub npc: Entity,
}

/// Why a sale was refused. Nothing changes when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeError {
    NotInteractable,
    CoolingDown,
    NothingToSell,
    Inventory(InventoryError),
}

impl fmt::Display for TradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInteractable => f.write_str("trader is not interactable"),
            Self::CoolingDown => f.write_str("trader is cooling down"),
            Self::NothingToSell => f.write_str("no herbs to sell"),
            Self::Inventory(err) => write!(f, "inventory rejected the sale: {}", err),
        }
    }
}

impl std::error::Error for TradeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Inventory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InventoryError> for TradeError {
    fn from(value: InventoryError) -> Self {
        Self::Inventory(value)
    }
}

/// Outcome of a completed sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleReceipt {
    pub reward: u32,
    pub herbs_left: u32,
    pub cash: u32,
    pub available_at: Duration,
}

/// Sells one herb to `trader` and starts its cooldown.
///
/// Every precondition is checked before anything is mutated.
pub fn sell_to(
    npc: Entity,
    trader: &mut Trader,
    inventory: &mut Inventory,
    cooldowns: &mut DeferredQueue<CooldownExpired>,
    rules: &TradeRules,
    now: Duration,
) -> Result<SaleReceipt, TradeError> {
    if !trader.interactable {
        return Err(TradeError::NotInteractable);
    }
    if trader.in_cooldown() {
        return Err(TradeError::CoolingDown);
    }
    if inventory.count(HERB_SLOT) == 0 {
        return Err(TradeError::NothingToSell);
    }
    for index in [HERB_SLOT, CASH_SLOT] {
        if !inventory.slot(index).is_some_and(|slot| slot.has_icon()) {
            return Err(InventoryError::NoItemDefined { index }.into());
        }
    }

    let herbs_left = inventory.add_count(HERB_SLOT, -1)?;
    let cash = inventory.add_count(CASH_SLOT, i64::from(rules.reward))?;
    trader.begin_cooldown();
    cooldowns.schedule(now, rules.cooldown, CooldownExpired { npc });

    Ok(SaleReceipt {
        reward: rules.reward,
        herbs_left,
        cash,
        available_at: now.saturating_add(rules.cooldown),
    })
}
