//! Identity for stored records.
//!
//! Items and movements are kept in flat lists; lookups, updates and deletes
//! all go through the record's id rather than positional indexes.

/// A record that is addressed by a stable id.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// True when this record carries `id`.
    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}

/// Position of the record with `id` in `records`, if any.
pub fn position_of<E: Entity>(records: &[E], id: &E::Id) -> Option<usize> {
    records.iter().position(|record| record.has_id(id))
}
