//! `medstock-core`: foundation building blocks shared by the inventory domain
//! and the storage layer.
//!
//! This crate contains **pure** primitives (no IO).

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::{Entity, position_of};
pub use error::{StoreError, StoreResult};
pub use id::{ItemId, MovementId};
