//! Demo catalog fixture.
//!
//! Only applied when explicitly requested (see the store's
//! `seed_demo_catalog`); constructing a store never seeds data.

use chrono::NaiveDate;

use medstock_core::ItemId;

use crate::item::InventoryItem;

#[allow(clippy::too_many_arguments)]
fn demo_item(
    id: &str,
    name: &str,
    sku: &str,
    category: &str,
    quantity: i64,
    expiration: (i32, u32, u32),
    supplier: &str,
    location: &str,
    low_stock_threshold: i64,
) -> InventoryItem {
    let (y, m, d) = expiration;
    InventoryItem {
        id: ItemId::new(id),
        name: name.to_string(),
        sku: sku.to_string(),
        category: category.to_string(),
        quantity,
        expiration_date: NaiveDate::from_ymd_opt(y, m, d),
        supplier: Some(supplier.to_string()),
        location: Some(location.to_string()),
        low_stock_threshold,
    }
}

/// The five sample items of a fresh demo installation.
pub fn demo_catalog() -> Vec<InventoryItem> {
    vec![
        demo_item(
            "1",
            "Aspirin 81mg",
            "MED001",
            "Painkillers",
            150,
            (2023, 12, 31),
            "PharmaCorp",
            "Shelf A-3, Cabinet 2",
            50,
        ),
        demo_item(
            "2",
            "Bandage (Medium)",
            "MED002",
            "First Aid",
            42,
            (2025, 6, 30),
            "MediSupplies",
            "Shelf B-1, Cabinet 1",
            30,
        ),
        demo_item(
            "3",
            "Antibiotic Ointment",
            "MED003",
            "Topical",
            8,
            (2023, 11, 15),
            "HealthPlus",
            "Shelf A-2, Cabinet 3",
            15,
        ),
        demo_item(
            "4",
            "Sterile Gloves (Large)",
            "MED004",
            "Surgical Supplies",
            0,
            (2024, 3, 1),
            "SafeMed",
            "Shelf C-1, Cabinet 2",
            20,
        ),
        demo_item(
            "5",
            "Ibuprofen 200mg",
            "MED005",
            "Painkillers",
            25,
            (2024, 5, 20),
            "PharmaCorp",
            "Shelf A-3, Cabinet 1",
            30,
        ),
    ]
}
