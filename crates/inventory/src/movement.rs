use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medstock_core::{Entity, ItemId, MovementId};

/// Kind of stock movement recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementAction {
    Add,
    Remove,
    Sell,
}

impl MovementAction {
    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            MovementAction::Add => "Addition",
            MovementAction::Remove => "Removal",
            MovementAction::Sell => "Sale",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MovementAction::Add => "add",
            MovementAction::Remove => "remove",
            MovementAction::Sell => "sell",
        }
    }
}

impl core::fmt::Display for MovementAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Ledger entry (append-only, never mutated).
///
/// `item_id` is a weak reference: the item may have been deleted since.
/// `item_name` is the name at the time of the movement and is not re-synced
/// when the item is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: MovementId,
    pub item_id: ItemId,
    pub item_name: String,
    pub action: MovementAction,
    /// Amount moved (positive).
    pub quantity: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for StockMovement {
    type Id = MovementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
