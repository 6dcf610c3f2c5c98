use medstock_core::ItemId;
use medstock_infra::{FileDocumentStore, ITEMS_KEY, InventoryStore, SETTINGS_KEY, StoreConfig};
use medstock_inventory::{AlertSettings, StockAdjustment};

#[test]
fn state_survives_reopening_the_data_directory() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = StoreConfig::default()
            .with_data_dir(dir.path())
            .with_seed_demo(true)
            .open()
            .unwrap();
        assert!(store.record_sale(&ItemId::new("2"), 2, None).unwrap());
        store
            .adjust_stock(&ItemId::new("4"), StockAdjustment::Add, 40, None)
            .unwrap()
            .unwrap();
        store
            .put_settings(AlertSettings {
                email_alerts: true,
                alert_email: Some("pharmacy@example.com".to_string()),
                ..AlertSettings::default()
            })
            .unwrap();
    }

    let reopened = InventoryStore::new(FileDocumentStore::new(dir.path()));
    assert_eq!(reopened.get_item(&ItemId::new("2")).unwrap().unwrap().quantity, 40);
    assert_eq!(reopened.get_item(&ItemId::new("4")).unwrap().unwrap().quantity, 40);
    assert_eq!(reopened.list_movements().unwrap().len(), 2);
    assert_eq!(
        reopened.settings().unwrap().alert_email.as_deref(),
        Some("pharmacy@example.com")
    );
    assert!(dir.path().join(format!("{ITEMS_KEY}.json")).exists());
    assert!(dir.path().join(format!("{SETTINGS_KEY}.json")).exists());
}

#[test]
fn reopening_with_seed_does_not_duplicate_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::default().with_data_dir(dir.path()).with_seed_demo(true);

    config.open().unwrap();
    let store = config.open().unwrap();
    assert_eq!(store.list_items().unwrap().len(), 5);
}
