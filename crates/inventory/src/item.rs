use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use medstock_core::{Entity, ItemId, StoreError, StoreResult};

/// Catalog entry: one stocked product.
///
/// Field names serialize in camelCase to match the persisted catalog layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub sku: String,
    pub category: String,
    /// Current stock count. Operations never drive this below zero.
    pub quantity: i64,
    /// `None` means the item never expires.
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Per-item low stock threshold (inclusive).
    pub low_stock_threshold: i64,
}

impl InventoryItem {
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.quantity, self.low_stock_threshold)
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= 0
    }

    /// Positive quantity at or below the item's own threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity > 0 && self.quantity <= self.low_stock_threshold
    }

    /// Input checks a form layer is expected to run before `add_item`.
    ///
    /// The store itself accepts any item; this is offered to callers.
    pub fn validate(&self) -> StoreResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(StoreError::invalid_id("ItemId: empty"));
        }
        for (field, value) in [
            ("name", &self.name),
            ("sku", &self.sku),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::validation(format!("{field} cannot be empty")));
            }
        }
        if self.quantity < 0 {
            return Err(StoreError::validation("quantity cannot be negative"));
        }
        if self.low_stock_threshold < 0 {
            return Err(StoreError::validation("lowStockThreshold cannot be negative"));
        }
        Ok(())
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Stock level classification of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StockStatus {
    OutOfStock,
    Low,
    InStock,
}

impl StockStatus {
    pub fn classify(quantity: i64, threshold: i64) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity <= threshold {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }
}

/// Catalog table filter: free-text search over name/SKU plus an exact category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Case-insensitive substring match on name or SKU; empty terms match everything.
    pub fn matches(&self, item: &InventoryItem) -> bool {
        let matches_search = match self.search.as_deref().map(str::to_lowercase) {
            None => true,
            Some(term) => {
                item.name.to_lowercase().contains(&term) || item.sku.to_lowercase().contains(&term)
            }
        };
        let matches_category = match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => item.category == category,
        };
        matches_search && matches_category
    }
}
