//! Derived dashboard views over the catalog.
//!
//! All functions are pure and recomputed from the full catalog on every call.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::expiry::is_expiring_soon;
use crate::item::InventoryItem;
use crate::settings::AlertSettings;

/// Headline dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_items: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub expiring_soon: usize,
}

fn expiring_soon(item: &InventoryItem, now: DateTime<Utc>, settings: &AlertSettings) -> bool {
    item.expiration_date
        .is_some_and(|exp| is_expiring_soon(exp, now, settings.expiration_alert_days))
}

/// Dashboard counters.
///
/// `low_stock` uses each item's own threshold; `settings.low_stock_threshold`
/// plays no part in it.
pub fn dashboard_stats(
    items: &[InventoryItem],
    settings: &AlertSettings,
    now: DateTime<Utc>,
) -> DashboardStats {
    DashboardStats {
        total_items: items.len(),
        out_of_stock: items.iter().filter(|i| i.is_out_of_stock()).count(),
        low_stock: items.iter().filter(|i| i.is_low_stock()).count(),
        expiring_soon: items
            .iter()
            .filter(|i| expiring_soon(i, now, settings))
            .count(),
    }
}

/// Low stock items, ascending by quantity.
pub fn low_stock_items(items: &[InventoryItem]) -> Vec<InventoryItem> {
    let mut low: Vec<InventoryItem> = items.iter().filter(|i| i.is_low_stock()).cloned().collect();
    low.sort_by_key(|i| i.quantity);
    low
}

/// Items expiring within the alert window, ascending by expiration date.
pub fn expiring_soon_items(
    items: &[InventoryItem],
    settings: &AlertSettings,
    now: DateTime<Utc>,
) -> Vec<InventoryItem> {
    let mut soon: Vec<InventoryItem> = items
        .iter()
        .filter(|i| expiring_soon(i, now, settings))
        .cloned()
        .collect();
    soon.sort_by_key(|i| i.expiration_date);
    soon
}

/// Items with no stock left (catalog order).
pub fn out_of_stock_items(items: &[InventoryItem]) -> Vec<InventoryItem> {
    items.iter().filter(|i| i.is_out_of_stock()).cloned().collect()
}

/// Distinct categories across the catalog.
pub fn categories(items: &[InventoryItem]) -> BTreeSet<String> {
    items.iter().map(|i| i.category.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};
    use medstock_core::ItemId;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn item(id: &str, quantity: i64, threshold: i64, expires_in_days: Option<i64>) -> InventoryItem {
        InventoryItem {
            id: ItemId::new(id),
            name: format!("Item {id}"),
            sku: format!("SKU{id}"),
            category: "General".to_string(),
            quantity,
            expiration_date: expires_in_days.map(|d| now().date_naive() + Duration::days(d)),
            supplier: None,
            location: None,
            low_stock_threshold: threshold,
        }
    }

    #[test]
    fn per_item_threshold_drives_low_stock() {
        let items = vec![item("3", 8, 15, None), item("5", 25, 30, None), item("2", 42, 30, None)];
        let settings = AlertSettings {
            low_stock_threshold: 5,
            ..AlertSettings::default()
        };
        let stats = dashboard_stats(&items, &settings, now());
        assert_eq!(stats.low_stock, 2);

        let low = low_stock_items(&items);
        let ids: Vec<&str> = low.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "5"]);
    }

    #[test]
    fn expiring_soon_excludes_expired_and_far_future() {
        let items = vec![
            item("a", 1, 0, Some(30)),
            item("b", 1, 0, Some(31)),
            item("c", 1, 0, Some(0)),
            item("d", 1, 0, Some(-10)),
            item("e", 1, 0, Some(3)),
            item("f", 1, 0, None),
        ];
        let settings = AlertSettings::default();
        let soon = expiring_soon_items(&items, &settings, now());
        let ids: Vec<&str> = soon.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["e", "a"]);
        assert_eq!(dashboard_stats(&items, &settings, now()).expiring_soon, 2);
    }

    #[test]
    fn dashboard_counts() {
        let items = vec![
            item("1", 0, 10, None),
            item("2", 5, 10, Some(10)),
            item("3", 50, 10, Some(400)),
        ];
        let stats = dashboard_stats(&items, &AlertSettings::default(), now());
        assert_eq!(
            stats,
            DashboardStats {
                total_items: 3,
                out_of_stock: 1,
                low_stock: 1,
                expiring_soon: 1,
            }
        );
    }

    #[test]
    fn categories_are_distinct() {
        let mut a = item("1", 1, 1, None);
        a.category = "Topical".to_string();
        let b = item("2", 1, 1, None);
        let c = item("3", 1, 1, None);
        let cats = categories(&[a, b, c]);
        assert_eq!(cats.len(), 2);
        assert!(cats.contains("Topical"));
        assert!(cats.contains("General"));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: out-of-stock and low-stock are disjoint, low-stock membership
        /// is exactly `0 < quantity <= threshold`, and the list is sorted.
        #[test]
        fn low_and_out_of_stock_partition(
            specs in prop::collection::vec((-5i64..60, 0i64..40), 0..30)
        ) {
            let items: Vec<InventoryItem> = specs
                .iter()
                .enumerate()
                .map(|(n, (q, t))| item(&n.to_string(), *q, *t, None))
                .collect();

            let low = low_stock_items(&items);
            let out = out_of_stock_items(&items);

            for i in &items {
                let in_low = low.iter().any(|l| l.id == i.id);
                let in_out = out.iter().any(|o| o.id == i.id);
                prop_assert_eq!(in_low, i.quantity > 0 && i.quantity <= i.low_stock_threshold);
                prop_assert_eq!(in_out, i.quantity <= 0);
                prop_assert!(!(in_low && in_out));
            }
            prop_assert!(low.windows(2).all(|w| w[0].quantity <= w[1].quantity));
        }

        /// Property: expiring-soon list is sorted and every member is inside the window.
        #[test]
        fn expiring_soon_sorted_and_bounded(
            offsets in prop::collection::vec(prop::option::of(-60i64..90), 0..30),
            window in 1i64..60,
        ) {
            let items: Vec<InventoryItem> = offsets
                .iter()
                .enumerate()
                .map(|(n, d)| item(&n.to_string(), 1, 0, *d))
                .collect();
            let settings = AlertSettings { expiration_alert_days: window, ..AlertSettings::default() };
            let soon = expiring_soon_items(&items, &settings, now());

            prop_assert!(soon.windows(2).all(|w| w[0].expiration_date <= w[1].expiration_date));
            for i in &soon {
                let exp: NaiveDate = i.expiration_date.unwrap();
                let days = crate::expiry::days_until(exp, now());
                prop_assert!(days > 0 && days <= window);
            }
            prop_assert_eq!(soon.len(), dashboard_stats(&items, &settings, now()).expiring_soon);
        }
    }
}
