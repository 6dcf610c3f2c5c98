//! Inventory store: the single read/write API over the catalog, the ledger
//! and the alert settings.
//!
//! Every operation reads the documents it needs in full, mutates them in
//! memory and writes them back in full. There is exactly one writer, so no
//! locking or versioning happens at this level.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use medstock_core::{
    Clock, Entity, ItemId, MovementId, StoreError, StoreResult, SystemClock, position_of,
};
use medstock_inventory::{
    AlertSettings, CategorySummary, DashboardStats, ExpirationReportRow, InventoryItem,
    ItemFilter, MovementReportRow, ReportPeriod, StockAdjustment, StockChangeError,
    StockMovement, demo_catalog, plan_adjustment, plan_sale, queries, reports,
};

use crate::document_store::DocumentStore;

/// Document key of the item catalog (JSON array).
pub const ITEMS_KEY: &str = "inventoryItems";
/// Document key of the movement ledger (JSON array).
pub const MOVEMENTS_KEY: &str = "stockMovements";
/// Document key of the alert settings (JSON object).
pub const SETTINGS_KEY: &str = "alertSettings";

/// Inventory store over a [`DocumentStore`] backend.
///
/// Construct once per session and pass by reference; tests build one over an
/// `InMemoryDocumentStore` with a `FixedClock`.
#[derive(Debug)]
pub struct InventoryStore<D, C = SystemClock> {
    documents: D,
    clock: C,
}

impl<D> InventoryStore<D, SystemClock>
where
    D: DocumentStore,
{
    pub fn new(documents: D) -> Self {
        Self::with_clock(documents, SystemClock)
    }
}

impl<D, C> InventoryStore<D, C>
where
    D: DocumentStore,
    C: Clock,
{
    pub fn with_clock(documents: D, clock: C) -> Self {
        Self { documents, clock }
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn load<T>(&self, key: &str) -> StoreResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let Some(raw) = self.documents.read(key)? else {
            tracing::debug!(key, "document not initialized");
            return Ok(None);
        };
        tracing::debug!(key, bytes = raw.len(), "read document");
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StoreError::corrupt(key, err))
    }

    fn save<T>(&self, key: &str, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)
            .map_err(|err| StoreError::backend(format!("failed to serialize '{key}': {err}")))?;
        tracing::debug!(key, bytes = raw.len(), "write document");
        self.documents.write(key, &raw)
    }

    /// Write defaults for every document that does not exist yet: empty
    /// catalog, empty ledger, default settings. Never seeds demo items.
    pub fn initialize(&self) -> StoreResult<()> {
        if self.documents.read(ITEMS_KEY)?.is_none() {
            self.save(ITEMS_KEY, &Vec::<InventoryItem>::new())?;
        }
        if self.documents.read(MOVEMENTS_KEY)?.is_none() {
            self.save(MOVEMENTS_KEY, &Vec::<StockMovement>::new())?;
        }
        if self.documents.read(SETTINGS_KEY)?.is_none() {
            tracing::info!("initializing default alert settings");
            self.save(SETTINGS_KEY, &AlertSettings::default())?;
        }
        Ok(())
    }

    /// Load the demo catalog when the catalog is empty. Returns whether it was written.
    pub fn seed_demo_catalog(&self) -> StoreResult<bool> {
        if !self.list_items()?.is_empty() {
            return Ok(false);
        }
        let items = demo_catalog();
        tracing::info!(items = items.len(), "seeding demo catalog");
        self.save(ITEMS_KEY, &items)?;
        Ok(true)
    }

    // ---- catalog -----------------------------------------------------------

    /// Full catalog, insertion order.
    pub fn list_items(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(self.load(ITEMS_KEY)?.unwrap_or_default())
    }

    pub fn get_item(&self, id: &ItemId) -> StoreResult<Option<InventoryItem>> {
        Ok(self.list_items()?.into_iter().find(|item| item.has_id(id)))
    }

    /// Append an item. The id is not checked for uniqueness; a duplicate id
    /// shadows later entries on lookup.
    pub fn add_item(&self, item: InventoryItem) -> StoreResult<()> {
        let mut items = self.list_items()?;
        if position_of(&items, item.id()).is_some() {
            tracing::warn!(item_id = %item.id, "adding item with an id already in the catalog");
        }
        tracing::info!(item_id = %item.id, sku = %item.sku, "item added");
        items.push(item);
        self.save(ITEMS_KEY, &items)
    }

    /// Replace the entry with the same id. Returns `false` (and writes nothing)
    /// when no such entry exists.
    pub fn update_item(&self, item: InventoryItem) -> StoreResult<bool> {
        let mut items = self.list_items()?;
        let Some(index) = position_of(&items, item.id()) else {
            tracing::warn!(item_id = %item.id, "update for unknown item");
            return Ok(false);
        };
        tracing::info!(item_id = %item.id, "item updated");
        items[index] = item;
        self.save(ITEMS_KEY, &items)?;
        Ok(true)
    }

    /// Remove every entry with this id. Returns whether anything was removed.
    pub fn delete_item(&self, id: &ItemId) -> StoreResult<bool> {
        let mut items = self.list_items()?;
        let before = items.len();
        items.retain(|item| !item.has_id(id));
        self.save(ITEMS_KEY, &items)?;
        let removed = items.len() != before;
        if removed {
            tracing::info!(item_id = %id, "item deleted");
        } else {
            tracing::warn!(item_id = %id, "delete for unknown item");
        }
        Ok(removed)
    }

    pub fn list_categories(&self) -> StoreResult<BTreeSet<String>> {
        Ok(queries::categories(&self.list_items()?))
    }

    /// Catalog entries matching a name/SKU search and optional category.
    pub fn search_items(&self, filter: &ItemFilter) -> StoreResult<Vec<InventoryItem>> {
        Ok(self
            .list_items()?
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect())
    }

    pub fn generate_item_id(&self) -> ItemId {
        ItemId::generate()
    }

    // ---- ledger ------------------------------------------------------------

    /// Full ledger in write order.
    pub fn list_movements(&self) -> StoreResult<Vec<StockMovement>> {
        Ok(self.load(MOVEMENTS_KEY)?.unwrap_or_default())
    }

    /// Append-only; the referenced item is not checked.
    pub fn append_movement(&self, movement: StockMovement) -> StoreResult<()> {
        let mut movements = self.list_movements()?;
        tracing::debug!(movement_id = %movement.id, action = %movement.action, "movement appended");
        movements.push(movement);
        self.save(MOVEMENTS_KEY, &movements)
    }

    pub fn generate_movement_id(&self) -> MovementId {
        MovementId::generate()
    }

    // ---- settings ----------------------------------------------------------

    /// Stored settings, or the defaults when none were saved yet.
    pub fn settings(&self) -> StoreResult<AlertSettings> {
        Ok(self.load(SETTINGS_KEY)?.unwrap_or_default())
    }

    /// Replace the settings record. The alert address is dropped when email
    /// alerts are off.
    pub fn put_settings(&self, settings: AlertSettings) -> StoreResult<()> {
        let settings = settings.normalized();
        tracing::info!(
            expiration_alert_days = settings.expiration_alert_days,
            email_alerts = settings.email_alerts,
            "alert settings saved"
        );
        self.save(SETTINGS_KEY, &settings)
    }

    // ---- stock changes -----------------------------------------------------

    /// Sell `quantity` units.
    ///
    /// Returns `false` without touching the catalog or ledger if the item does
    /// not exist or holds fewer than `quantity` units. A non-positive
    /// `quantity` is the only failure reported as an error (`Validation`).
    pub fn record_sale(
        &self,
        item_id: &ItemId,
        quantity: i64,
        notes: Option<String>,
    ) -> StoreResult<bool> {
        let Some(item) = self.get_item(item_id)? else {
            tracing::warn!(item_id = %item_id, "sale for unknown item");
            return Ok(false);
        };

        let change = match plan_sale(
            &item,
            quantity,
            notes,
            self.clock.now(),
            self.generate_movement_id(),
        ) {
            Ok(change) => change,
            Err(StockChangeError::InsufficientStock {
                available,
                requested,
            }) => {
                tracing::warn!(item_id = %item_id, available, requested, "sale rejected: insufficient stock");
                return Ok(false);
            }
            Err(err) => {
                return Err(StoreError::validation(err.to_string()));
            }
        };

        if !self.update_item(change.item)? {
            return Ok(false);
        }
        tracing::info!(
            item_id = %item_id,
            quantity,
            previous = change.movement.previous_quantity,
            new = change.movement.new_quantity,
            "sale recorded"
        );
        self.append_movement(change.movement)?;
        Ok(true)
    }

    /// Manual add/remove. Removal clamps at zero instead of failing.
    ///
    /// Returns the recorded movement, or `None` if the item does not exist.
    pub fn adjust_stock(
        &self,
        item_id: &ItemId,
        adjustment: StockAdjustment,
        quantity: i64,
        notes: Option<String>,
    ) -> StoreResult<Option<StockMovement>> {
        let Some(item) = self.get_item(item_id)? else {
            tracing::warn!(item_id = %item_id, "stock adjustment for unknown item");
            return Ok(None);
        };

        let change = plan_adjustment(
            &item,
            adjustment,
            quantity,
            notes,
            self.clock.now(),
            self.generate_movement_id(),
        )
        .map_err(|err| StoreError::validation(err.to_string()))?;

        if !self.update_item(change.item)? {
            return Ok(None);
        }
        tracing::info!(
            item_id = %item_id,
            action = %change.movement.action,
            quantity,
            previous = change.movement.previous_quantity,
            new = change.movement.new_quantity,
            "stock adjusted"
        );
        self.append_movement(change.movement.clone())?;
        Ok(Some(change.movement))
    }

    // ---- derived queries ---------------------------------------------------

    pub fn dashboard_stats(&self) -> StoreResult<DashboardStats> {
        Ok(queries::dashboard_stats(
            &self.list_items()?,
            &self.settings()?,
            self.clock.now(),
        ))
    }

    pub fn low_stock_items(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(queries::low_stock_items(&self.list_items()?))
    }

    pub fn expiring_soon_items(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(queries::expiring_soon_items(
            &self.list_items()?,
            &self.settings()?,
            self.clock.now(),
        ))
    }

    pub fn out_of_stock_items(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(queries::out_of_stock_items(&self.list_items()?))
    }

    // ---- reports -----------------------------------------------------------

    pub fn inventory_summary(&self) -> StoreResult<Vec<CategorySummary>> {
        let items = self.list_items()?;
        let categories = queries::categories(&items);
        Ok(reports::inventory_summary(&items, &categories))
    }

    pub fn expiration_report(&self) -> StoreResult<Vec<ExpirationReportRow>> {
        Ok(reports::expiration_report(
            &self.list_items()?,
            &self.settings()?,
            self.clock.now(),
        ))
    }

    /// Movements dated within `[start, end]` (inclusive, UTC dates), newest first.
    pub fn stock_movement_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<MovementReportRow>> {
        Ok(reports::stock_movement_report(
            &self.list_movements()?,
            &self.list_items()?,
            start,
            end,
        ))
    }

    pub fn stock_movement_report_for(
        &self,
        period: ReportPeriod,
    ) -> StoreResult<Vec<MovementReportRow>> {
        let (start, end) = period.resolve(self.clock.now().date_naive());
        self.stock_movement_report(start, end)
    }
}
