//! Error model shared by the domain and storage layers.

use thiserror::Error;

/// Result type used across the store.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error.
///
/// Business outcomes such as "item not found" or "insufficient stock" are
/// reported as `bool`/`Option` values by the store operations. This enum only
/// carries failures the caller cannot recover from by re-issuing the request
/// with different input: bad identifiers, unreadable documents, backend IO.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A value failed validation (e.g. blank required field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty string).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A persisted document could not be parsed.
    #[error("document '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    /// The persistence backend failed (IO, lock poisoning, ...).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn corrupt(key: impl Into<String>, reason: impl core::fmt::Display) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    pub fn backend(msg: impl core::fmt::Display) -> Self {
        Self::Backend(msg.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::backend(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_error_names_the_document() {
        let err = StoreError::corrupt("inventoryItems", "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "document 'inventoryItems' is corrupt: expected value at line 1 column 1"
        );
    }

    #[test]
    fn io_errors_become_backend_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Backend(msg) if msg.contains("denied")));
    }
}
