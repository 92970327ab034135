//! Reasons a use request committed nothing.
use std::fmt;

use crate::{
    inventory::components::InventoryError, npc::trade::TradeError, planter::components::PotError,
};

use super::components::{HitCategory, PotAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionError {
    NoTarget,
    /// The target only reports progress.
    NotActionable,
    /// The resolved pot action no longer matches the pot and held item.
    StaleTarget { expected: PotAction },
    MissingEntity { category: HitCategory },
    Pot(PotError),
    Trade(TradeError),
    Inventory(InventoryError),
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTarget => f.write_str("nothing targeted"),
            Self::NotActionable => f.write_str("target has no available action"),
            Self::StaleTarget { expected } => {
                write!(f, "target no longer allows {:?}", expected)
            }
            Self::MissingEntity { category } => {
                write!(f, "{:?} target no longer exists", category)
            }
            Self::Pot(err) => write!(f, "pot refused: {}", err),
            Self::Trade(err) => write!(f, "sale refused: {}", err),
            Self::Inventory(err) => write!(f, "inventory refused: {}", err),
        }
    }
}

impl std::error::Error for InteractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pot(err) => Some(err),
            Self::Trade(err) => Some(err),
            Self::Inventory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PotError> for InteractionError {
    fn from(value: PotError) -> Self {
        Self::Pot(value)
    }
}

impl From<TradeError> for InteractionError {
    fn from(value: TradeError) -> Self {
        Self::Trade(value)
    }
}

impl From<InventoryError> for InteractionError {
    fn from(value: InventoryError) -> Self {
        Self::Inventory(value)
    }
}
