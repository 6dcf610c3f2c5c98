//! Inventory domain module.
//!
//! This crate contains the catalog, ledger and settings types plus every
//! derived view over them (dashboard counts, alert lists, reports),
//! implemented purely as deterministic domain logic (no IO, no storage).
//! "Now" is always passed in by the caller.

pub mod expiry;
pub mod item;
pub mod movement;
pub mod queries;
pub mod reports;
pub mod seed;
pub mod settings;
pub mod stock;

pub use expiry::{DaysLeft, days_until, is_expiring_soon};
pub use item::{InventoryItem, ItemFilter, StockStatus};
pub use movement::{MovementAction, StockMovement};
pub use queries::{
    DashboardStats, categories, dashboard_stats, expiring_soon_items, low_stock_items,
    out_of_stock_items,
};
pub use reports::{
    CategorySummary, ExpirationReportRow, ExpirationStatus, MISSING_SKU, MovementReportRow,
    ReportPeriod, expiration_report, inventory_summary, stock_movement_report,
};
pub use seed::demo_catalog;
pub use settings::AlertSettings;
pub use stock::{StockAdjustment, StockChange, StockChangeError, plan_adjustment, plan_sale};
