//! Infrastructure layer: document persistence, the inventory store facade,
//! configuration.

pub mod config;
pub mod document_store;
pub mod store;

pub use config::{DynInventoryStore, StoreConfig};
pub use document_store::{DocumentStore, FileDocumentStore, InMemoryDocumentStore};
pub use store::{ITEMS_KEY, InventoryStore, MOVEMENTS_KEY, SETTINGS_KEY};
