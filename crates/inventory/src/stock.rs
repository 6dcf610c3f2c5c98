//! Stock changes: sales and manual adjustments.
//!
//! Both are planned purely here (updated item + ledger entry) and applied by
//! the store. The two paths deliberately differ on insufficient stock: a sale
//! is rejected outright, a manual removal clamps the quantity at zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use medstock_core::MovementId;

use crate::item::InventoryItem;
use crate::movement::{MovementAction, StockMovement};

/// Manual adjustment direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockAdjustment {
    Add,
    Remove,
}

impl From<StockAdjustment> for MovementAction {
    fn from(value: StockAdjustment) -> Self {
        match value {
            StockAdjustment::Add => MovementAction::Add,
            StockAdjustment::Remove => MovementAction::Remove,
        }
    }
}

/// Result of planning a stock change: the item to write back and the
/// movement to append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockChange {
    pub item: InventoryItem,
    pub movement: StockMovement,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockChangeError {
    #[error("quantity must be positive (got {0})")]
    NonPositiveQuantity(i64),

    #[error("insufficient stock (available {available}, requested {requested})")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("adding {requested} to {available} units exceeds the maximum stock level")]
    QuantityOverflow { available: i64, requested: i64 },
}

fn movement(
    id: MovementId,
    item: &InventoryItem,
    action: MovementAction,
    quantity: i64,
    new_quantity: i64,
    at: DateTime<Utc>,
    notes: Option<String>,
) -> StockMovement {
    StockMovement {
        id,
        item_id: item.id.clone(),
        item_name: item.name.clone(),
        action,
        quantity,
        previous_quantity: item.quantity,
        new_quantity,
        timestamp: at,
        notes,
    }
}

/// Plan a sale of `quantity` units.
///
/// Rejected when more units are requested than are in stock (no partial
/// sells). The recorded `previous_quantity` is the quantity strictly before
/// the sale.
pub fn plan_sale(
    item: &InventoryItem,
    quantity: i64,
    notes: Option<String>,
    at: DateTime<Utc>,
    movement_id: MovementId,
) -> Result<StockChange, StockChangeError> {
    if quantity <= 0 {
        return Err(StockChangeError::NonPositiveQuantity(quantity));
    }
    if item.quantity < quantity {
        return Err(StockChangeError::InsufficientStock {
            available: item.quantity,
            requested: quantity,
        });
    }

    let new_quantity = (item.quantity - quantity).max(0);
    let movement = movement(
        movement_id,
        item,
        MovementAction::Sell,
        quantity,
        new_quantity,
        at,
        notes,
    );

    Ok(StockChange {
        item: InventoryItem {
            quantity: new_quantity,
            ..item.clone()
        },
        movement,
    })
}

/// Plan a manual adjustment. Removal never fails on insufficient stock; the
/// quantity clamps to zero instead.
pub fn plan_adjustment(
    item: &InventoryItem,
    adjustment: StockAdjustment,
    quantity: i64,
    notes: Option<String>,
    at: DateTime<Utc>,
    movement_id: MovementId,
) -> Result<StockChange, StockChangeError> {
    if quantity <= 0 {
        return Err(StockChangeError::NonPositiveQuantity(quantity));
    }

    let new_quantity = match adjustment {
        StockAdjustment::Add => item.quantity.checked_add(quantity).ok_or(
            StockChangeError::QuantityOverflow {
                available: item.quantity,
                requested: quantity,
            },
        )?,
        StockAdjustment::Remove => item.quantity.saturating_sub(quantity).max(0),
    };
    let movement = movement(
        movement_id,
        item,
        adjustment.into(),
        quantity,
        new_quantity,
        at,
        notes,
    );

    Ok(StockChange {
        item: InventoryItem {
            quantity: new_quantity,
            ..item.clone()
        },
        movement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use medstock_core::ItemId;
    use proptest::prelude::*;

    fn test_item(quantity: i64) -> InventoryItem {
        InventoryItem {
            id: ItemId::new("3"),
            name: "Antibiotic Ointment".to_string(),
            sku: "MED003".to_string(),
            category: "Topical".to_string(),
            quantity,
            expiration_date: None,
            supplier: Some("HealthPlus".to_string()),
            location: None,
            low_stock_threshold: 15,
        }
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn sale_records_before_and_after() {
        let item = test_item(8);
        let change = plan_sale(&item, 3, Some("walk-in".to_string()), test_time(), MovementId::new("m1"))
            .unwrap();
        assert_eq!(change.item.quantity, 5);
        assert_eq!(change.movement.action, MovementAction::Sell);
        assert_eq!(change.movement.previous_quantity, 8);
        assert_eq!(change.movement.new_quantity, 5);
        assert_eq!(change.movement.quantity, 3);
        assert_eq!(change.movement.item_name, "Antibiotic Ointment");
        assert_eq!(change.item.supplier, item.supplier);
    }

    #[test]
    fn sale_of_entire_stock_is_allowed() {
        let change = plan_sale(&test_item(8), 8, None, test_time(), MovementId::new("m1")).unwrap();
        assert_eq!(change.item.quantity, 0);
    }

    #[test]
    fn sale_beyond_stock_is_rejected() {
        let err = plan_sale(&test_item(8), 9, None, test_time(), MovementId::new("m1")).unwrap_err();
        assert_eq!(
            err,
            StockChangeError::InsufficientStock {
                available: 8,
                requested: 9
            }
        );
    }

    #[test]
    fn removal_beyond_stock_clamps_to_zero() {
        let change = plan_adjustment(
            &test_item(8),
            StockAdjustment::Remove,
            20,
            None,
            test_time(),
            MovementId::new("m1"),
        )
        .unwrap();
        assert_eq!(change.item.quantity, 0);
        assert_eq!(change.movement.action, MovementAction::Remove);
        assert_eq!(change.movement.quantity, 20);
        assert_eq!(change.movement.previous_quantity, 8);
        assert_eq!(change.movement.new_quantity, 0);
    }

    #[test]
    fn addition_increases_stock() {
        let change = plan_adjustment(
            &test_item(8),
            StockAdjustment::Add,
            12,
            Some("delivery".to_string()),
            test_time(),
            MovementId::new("m1"),
        )
        .unwrap();
        assert_eq!(change.item.quantity, 20);
        assert_eq!(change.movement.action, MovementAction::Add);
        assert_eq!(change.movement.notes.as_deref(), Some("delivery"));
    }

    #[test]
    fn addition_past_i64_max_is_rejected() {
        let err = plan_adjustment(
            &test_item(5),
            StockAdjustment::Add,
            i64::MAX,
            None,
            test_time(),
            MovementId::new("m1"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            StockChangeError::QuantityOverflow {
                available: 5,
                requested: i64::MAX
            }
        );
    }

    #[test]
    fn removal_of_i64_max_clamps_to_zero() {
        let change = plan_adjustment(
            &test_item(-3),
            StockAdjustment::Remove,
            i64::MAX,
            None,
            test_time(),
            MovementId::new("m1"),
        )
        .unwrap();
        assert_eq!(change.item.quantity, 0);
    }

    #[test]
    fn non_positive_quantities_are_rejected() {
        assert_eq!(
            plan_sale(&test_item(8), 0, None, test_time(), MovementId::new("m1")).unwrap_err(),
            StockChangeError::NonPositiveQuantity(0)
        );
        assert_eq!(
            plan_adjustment(
                &test_item(8),
                StockAdjustment::Add,
                -2,
                None,
                test_time(),
                MovementId::new("m1")
            )
            .unwrap_err(),
            StockChangeError::NonPositiveQuantity(-2)
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a sale succeeds iff requested <= stock, and then
        /// new = old - requested.
        #[test]
        fn sale_is_all_or_nothing(stock in 0i64..500, requested in 1i64..600) {
            let item = test_item(stock);
            match plan_sale(&item, requested, None, test_time(), MovementId::new("m")) {
                Ok(change) => {
                    prop_assert!(requested <= stock);
                    prop_assert_eq!(change.item.quantity, stock - requested);
                    prop_assert_eq!(change.movement.previous_quantity, stock);
                    prop_assert_eq!(change.movement.new_quantity, stock - requested);
                }
                Err(err) => {
                    prop_assert!(requested > stock);
                    let is_insufficient = matches!(err, StockChangeError::InsufficientStock { .. });
                    prop_assert!(is_insufficient);
                }
            }
        }

        /// Property: removal never fails and never goes negative.
        #[test]
        fn removal_never_negative(stock in 0i64..500, requested in 1i64..600) {
            let item = test_item(stock);
            let change = plan_adjustment(
                &item,
                StockAdjustment::Remove,
                requested,
                None,
                test_time(),
                MovementId::new("m"),
            ).unwrap();
            prop_assert_eq!(change.item.quantity, (stock - requested).max(0));
            prop_assert!(change.item.quantity >= 0);
        }
    }
}
