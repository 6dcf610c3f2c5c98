use std::sync::Arc;

use medstock_core::StoreResult;

/// Keyed whole-document storage.
///
/// Implementations hold opaque JSON text; parsing is the caller's concern.
/// A missing key reads as `Ok(None)` ("not yet initialized"), never as an error.
pub trait DocumentStore: Send + Sync {
    /// Read the full document stored under `key`.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the full document stored under `key`.
    fn write(&self, key: &str, document: &str) -> StoreResult<()>;
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, document: &str) -> StoreResult<()> {
        (**self).write(key, document)
    }
}
