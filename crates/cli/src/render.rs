//! Terminal rendering: plain text tables or pretty JSON.

use std::collections::BTreeSet;

use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use medstock_core::Clock;
use medstock_inventory::{
    AlertSettings, CategorySummary, DashboardStats, DaysLeft, ExpirationReportRow, InventoryItem,
    MovementReportRow, StockMovement, StockStatus,
};

const NA: &str = "N/A";

pub struct Output {
    json: bool,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NA,
    }
}

fn status_label(status: StockStatus) -> &'static str {
    match status {
        StockStatus::OutOfStock => "OUT",
        StockStatus::Low => "LOW",
        StockStatus::InStock => "",
    }
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn message(&self, text: &str) {
        if self.json {
            println!("{}", json!({ "message": text }));
        } else {
            println!("{text}");
        }
    }

    pub fn lines(&self, values: &BTreeSet<String>) -> Result<()> {
        if self.json {
            return print_json(values);
        }
        for value in values {
            println!("{value}");
        }
        Ok(())
    }

    pub fn items(&self, items: &[InventoryItem]) -> Result<()> {
        if self.json {
            return print_json(items);
        }
        println!(
            "{:<34} {:<28} {:<10} {:<18} {:>6} {:<4} {:<11} {:<14} {}",
            "ID", "NAME", "SKU", "CATEGORY", "QTY", "", "EXPIRES", "SUPPLIER", "LOCATION"
        );
        for item in items {
            println!(
                "{:<34} {:<28} {:<10} {:<18} {:>6} {:<4} {:<11} {:<14} {}",
                item.id,
                item.name,
                item.sku,
                item.category,
                item.quantity,
                status_label(item.stock_status()),
                item.expiration_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| NA.to_string()),
                or_na(item.supplier.as_deref()),
                or_na(item.location.as_deref()),
            );
        }
        Ok(())
    }

    pub fn item(&self, item: &InventoryItem) -> Result<()> {
        if self.json {
            return print_json(item);
        }
        println!("id:         {}", item.id);
        println!("name:       {}", item.name);
        println!("sku:        {}", item.sku);
        println!("category:   {}", item.category);
        println!(
            "quantity:   {} (threshold {})",
            item.quantity, item.low_stock_threshold
        );
        println!(
            "expires:    {}",
            item.expiration_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| NA.to_string())
        );
        println!("supplier:   {}", or_na(item.supplier.as_deref()));
        println!("location:   {}", or_na(item.location.as_deref()));
        Ok(())
    }

    pub fn movements(&self, movements: &[StockMovement]) -> Result<()> {
        if self.json {
            return print_json(movements);
        }
        println!(
            "{:<20} {:<28} {:<8} {:>6} {:>8} {:>6}  {}",
            "TIMESTAMP", "ITEM", "ACTION", "QTY", "PREVIOUS", "NEW", "NOTES"
        );
        for m in movements {
            println!(
                "{:<20} {:<28} {:<8} {:>6} {:>8} {:>6}  {}",
                m.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                m.item_name,
                m.action.label(),
                m.quantity,
                m.previous_quantity,
                m.new_quantity,
                m.notes.as_deref().unwrap_or(""),
            );
        }
        Ok(())
    }

    pub fn dashboard(
        &self,
        stats: &DashboardStats,
        low_stock: &[InventoryItem],
        expiring: &[InventoryItem],
        clock: &impl Clock,
    ) -> Result<()> {
        if self.json {
            return print_json(&json!({
                "stats": stats,
                "lowStockItems": low_stock,
                "expiringSoonItems": expiring,
            }));
        }
        println!("Total items:   {}", stats.total_items);
        println!("Out of stock:  {}", stats.out_of_stock);
        println!("Low stock:     {}", stats.low_stock);
        println!("Expiring soon: {}", stats.expiring_soon);

        if !low_stock.is_empty() {
            println!();
            println!("{:<28} {:<10} {:>6} {:>9}", "LOW STOCK", "SKU", "QTY", "THRESHOLD");
            for item in low_stock {
                println!(
                    "{:<28} {:<10} {:>6} {:>9}",
                    item.name, item.sku, item.quantity, item.low_stock_threshold
                );
            }
        }

        if !expiring.is_empty() {
            let now = clock.now();
            println!();
            println!("{:<28} {:<10} {:<11} {}", "EXPIRING SOON", "SKU", "EXPIRES", "DAYS LEFT");
            for item in expiring {
                let Some(date) = item.expiration_date else {
                    continue;
                };
                println!(
                    "{:<28} {:<10} {:<11} {}",
                    item.name,
                    item.sku,
                    date.to_string(),
                    DaysLeft::compute(date, now)
                );
            }
        }
        Ok(())
    }

    pub fn summary(&self, rows: &[CategorySummary]) -> Result<()> {
        if self.json {
            return print_json(rows);
        }
        println!(
            "{:<24} {:>6} {:>9} {:>13} {:>10}",
            "CATEGORY", "TOTAL", "IN STOCK", "OUT OF STOCK", "LOW STOCK"
        );
        for row in rows {
            println!(
                "{:<24} {:>6} {:>9} {:>13} {:>10}",
                row.category, row.total, row.in_stock, row.out_of_stock, row.low_stock
            );
        }
        Ok(())
    }

    pub fn expiration(&self, rows: &[ExpirationReportRow]) -> Result<()> {
        if self.json {
            return print_json(rows);
        }
        println!(
            "{:<28} {:<10} {:<18} {:>6} {:<11} {}",
            "ITEM", "SKU", "CATEGORY", "QTY", "EXPIRES", "DAYS LEFT"
        );
        for row in rows {
            println!(
                "{:<28} {:<10} {:<18} {:>6} {:<11} {}",
                row.name,
                row.sku,
                row.category,
                row.quantity,
                row.expiration_date.to_string(),
                row.days_left
            );
        }
        Ok(())
    }

    pub fn movement_report(&self, rows: &[MovementReportRow]) -> Result<()> {
        if self.json {
            return print_json(rows);
        }
        println!(
            "{:<20} {:<28} {:<10} {:<9} {:>6} {:>8} {:>6}  {}",
            "DATE/TIME", "ITEM", "SKU", "ACTION", "QTY", "PREVIOUS", "NEW", "NOTES"
        );
        for row in rows {
            println!(
                "{:<20} {:<28} {:<10} {:<9} {:>6} {:>8} {:>6}  {}",
                row.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                row.item_name,
                row.sku,
                row.action_label(),
                row.quantity,
                row.previous_quantity,
                row.new_quantity,
                row.notes.as_deref().unwrap_or(""),
            );
        }
        Ok(())
    }

    pub fn settings(&self, settings: &AlertSettings) -> Result<()> {
        if self.json {
            return print_json(settings);
        }
        println!("Low stock threshold:   {}", settings.low_stock_threshold);
        println!("Expiration alert days: {}", settings.expiration_alert_days);
        println!("Email alerts:          {}", settings.email_alerts);
        if settings.email_alerts {
            println!(
                "Alert email:           {}",
                or_na(settings.alert_email.as_deref())
            );
        }
        Ok(())
    }
}
