use std::collections::HashMap;
use std::sync::RwLock;

use medstock_core::{StoreError, StoreResult};

use super::r#trait::DocumentStore;

/// In-memory document store.
///
/// Intended for tests and throwaway sessions; nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, String>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store (e.g. a captured browser `localStorage` dump).
    pub fn with_documents<I, K, V>(documents: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            documents: RwLock::new(
                documents
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        Ok(documents.get(key).cloned())
    }

    fn write(&self, key: &str, document: &str) -> StoreResult<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        documents.insert(key.to_string(), document.to_string());
        Ok(())
    }
}
