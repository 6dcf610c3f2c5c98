//! Whole-document storage boundary.
//!
//! Each document is a JSON string stored under a key and always read and
//! written in full (no partial updates). This is the only place the store
//! touches persistence.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileDocumentStore;
pub use in_memory::InMemoryDocumentStore;
pub use r#trait::DocumentStore;
