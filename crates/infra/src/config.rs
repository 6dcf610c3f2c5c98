//! Store configuration and wiring.

use std::path::PathBuf;
use std::sync::Arc;

use medstock_core::StoreResult;

use crate::document_store::{DocumentStore, FileDocumentStore, InMemoryDocumentStore};
use crate::store::InventoryStore;

/// Directory holding the JSON documents. Unset means an in-memory session.
pub const DATA_DIR_ENV: &str = "MEDSTOCK_DATA_DIR";
/// `true` to load the demo catalog into an empty store on open.
pub const SEED_DEMO_ENV: &str = "MEDSTOCK_SEED_DEMO";

/// Type-erased store handed to long-lived callers.
pub type DynInventoryStore = InventoryStore<Arc<dyn DocumentStore>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: Option<PathBuf>,
    pub seed_demo: bool,
}

impl StoreConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup(DATA_DIR_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let seed_demo = match lookup(SEED_DEMO_ENV) {
            None => false,
            Some(raw) => raw.trim().parse::<bool>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "{SEED_DEMO_ENV} is not a boolean; demo seeding disabled");
                false
            }),
        };

        Self {
            data_dir,
            seed_demo,
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_seed_demo(mut self, seed_demo: bool) -> Self {
        self.seed_demo = seed_demo;
        self
    }

    /// Build the backend, write default documents, and seed the demo catalog
    /// if requested.
    pub fn open(&self) -> StoreResult<DynInventoryStore> {
        let documents: Arc<dyn DocumentStore> = match &self.data_dir {
            Some(dir) => {
                tracing::info!(data_dir = %dir.display(), "opening file-backed inventory store");
                Arc::new(FileDocumentStore::new(dir.clone()))
            }
            None => {
                tracing::warn!("{DATA_DIR_ENV} not set; using an in-memory inventory store");
                Arc::new(InMemoryDocumentStore::new())
            }
        };

        let store = InventoryStore::new(documents);
        store.initialize()?;
        if self.seed_demo {
            store.seed_demo_catalog()?;
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_to_in_memory_without_demo_data() {
        let config = StoreConfig::from_lookup(lookup(&[]));
        assert_eq!(config, StoreConfig::default());

        let store = config.open().unwrap();
        assert!(store.list_items().unwrap().is_empty());
    }

    #[test]
    fn reads_data_dir_and_seed_flag() {
        let config = StoreConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV, "/var/lib/medstock"),
            (SEED_DEMO_ENV, "true"),
        ]));
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/medstock")));
        assert!(config.seed_demo);
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = StoreConfig::from_lookup(lookup(&[(DATA_DIR_ENV, "  "), (SEED_DEMO_ENV, "yes")]));
        assert_eq!(config.data_dir, None);
        assert!(!config.seed_demo);
    }

    #[test]
    fn open_seeds_when_requested() {
        let store = StoreConfig::default().with_seed_demo(true).open().unwrap();
        assert_eq!(store.list_items().unwrap().len(), 5);
        assert_eq!(store.settings().unwrap().expiration_alert_days, 30);
    }
}
