//! Reports: per-category summary, expiration schedule, movement history.
//!
//! Reports are views over the catalog and ledger; nothing here is stored.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use medstock_core::{ItemId, MovementId};

use crate::expiry::{DaysLeft, days_until};
use crate::item::{InventoryItem, StockStatus};
use crate::movement::{MovementAction, StockMovement};
use crate::settings::AlertSettings;

/// SKU shown for movements whose item no longer exists.
pub const MISSING_SKU: &str = "N/A";

/// Per-category stock counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub total: usize,
    pub in_stock: usize,
    pub out_of_stock: usize,
    /// Subset of `in_stock` at or below the per-item threshold.
    pub low_stock: usize,
}

/// Inventory summary grouped by category, ordered by category name.
///
/// Every entry of `known_categories` gets a row, even when no item carries it.
pub fn inventory_summary(
    items: &[InventoryItem],
    known_categories: &BTreeSet<String>,
) -> Vec<CategorySummary> {
    let mut rows: BTreeMap<&str, CategorySummary> = known_categories
        .iter()
        .map(|c| {
            (
                c.as_str(),
                CategorySummary {
                    category: c.clone(),
                    ..CategorySummary::default()
                },
            )
        })
        .collect();

    for item in items {
        let row = rows
            .entry(item.category.as_str())
            .or_insert_with(|| CategorySummary {
                category: item.category.clone(),
                ..CategorySummary::default()
            });
        row.total += 1;
        match item.stock_status() {
            StockStatus::OutOfStock => row.out_of_stock += 1,
            StockStatus::Low => {
                row.in_stock += 1;
                row.low_stock += 1;
            }
            StockStatus::InStock => row.in_stock += 1,
        }
    }

    rows.into_values().collect()
}

/// Expiration classification of a report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpirationStatus {
    Expired,
    ExpiringSoon,
    Ok,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationReportRow {
    pub item_id: ItemId,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub quantity: i64,
    pub expiration_date: NaiveDate,
    pub days_left: DaysLeft,
    pub status: ExpirationStatus,
}

/// Every item with an expiration date, soonest first.
///
/// Unlike the dashboard counter, already expired items are listed here
/// (as `DaysLeft::Expired`).
pub fn expiration_report(
    items: &[InventoryItem],
    settings: &AlertSettings,
    now: DateTime<Utc>,
) -> Vec<ExpirationReportRow> {
    let mut rows: Vec<ExpirationReportRow> = items
        .iter()
        .filter_map(|item| {
            let expiration_date = item.expiration_date?;
            let days = days_until(expiration_date, now);
            let status = if days <= 0 {
                ExpirationStatus::Expired
            } else if days <= settings.expiration_alert_days {
                ExpirationStatus::ExpiringSoon
            } else {
                ExpirationStatus::Ok
            };
            Some(ExpirationReportRow {
                item_id: item.id.clone(),
                name: item.name.clone(),
                sku: item.sku.clone(),
                category: item.category.clone(),
                quantity: item.quantity,
                expiration_date,
                days_left: DaysLeft::from_days(days),
                status,
            })
        })
        .collect();
    rows.sort_by_key(|r| r.expiration_date);
    rows
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementReportRow {
    pub movement_id: MovementId,
    pub timestamp: DateTime<Utc>,
    pub item_id: ItemId,
    /// Name captured when the movement was recorded.
    pub item_name: String,
    /// Current catalog SKU, or [`MISSING_SKU`] if the item was deleted.
    pub sku: String,
    pub action: MovementAction,
    pub quantity: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub notes: Option<String>,
}

impl MovementReportRow {
    pub fn action_label(&self) -> &'static str {
        self.action.label()
    }
}

/// Ledger entries whose UTC date falls in `[start, end]`, newest first.
pub fn stock_movement_report(
    movements: &[StockMovement],
    items: &[InventoryItem],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<MovementReportRow> {
    let skus: HashMap<&ItemId, &str> = items.iter().map(|i| (&i.id, i.sku.as_str())).collect();

    let mut rows: Vec<MovementReportRow> = movements
        .iter()
        .filter(|m| {
            let day = m.timestamp.date_naive();
            day >= start && day <= end
        })
        .map(|m| MovementReportRow {
            movement_id: m.id.clone(),
            timestamp: m.timestamp,
            item_id: m.item_id.clone(),
            item_name: m.item_name.clone(),
            sku: skus
                .get(&m.item_id)
                .copied()
                .unwrap_or(MISSING_SKU)
                .to_string(),
            action: m.action,
            quantity: m.quantity,
            previous_quantity: m.previous_quantity,
            new_quantity: m.new_quantity,
            notes: m.notes.clone(),
        })
        .collect();
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    rows
}

/// Reporting window for the movement report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportPeriod {
    Last7Days,
    Last30Days,
    AllTime,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl ReportPeriod {
    /// Inclusive `(start, end)` dates relative to `today`.
    pub fn resolve(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            ReportPeriod::Last7Days => (today - Duration::days(7), today),
            ReportPeriod::Last30Days => (today - Duration::days(30), today),
            ReportPeriod::AllTime => (NaiveDate::default(), today),
            ReportPeriod::Custom { start, end } => (start, end),
        }
    }
}
