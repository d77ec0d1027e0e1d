//! The record abstraction shared by every collection.
//!
//! A [`Record`] knows its kind, its id, how to build itself from a creation
//! input, and how to merge a patch. That is everything the generic CRUD
//! engine in [`crate::collection`] needs.

use std::fmt::Debug;

use rendezvous_foundation::{EntityKind, RecordId};

/// A stored record of one entity kind.
pub trait Record: Clone + Debug {
    /// The kind tag used in errors and operation names.
    const KIND: EntityKind;

    /// Creation input: every attribute except `id`.
    type Input;

    /// Partial update: every attribute except `id`, each optional.
    type Patch;

    /// Returns this record's id.
    fn id(&self) -> RecordId;

    /// Builds a record from a freshly allocated id and a creation input.
    fn from_input(id: RecordId, input: Self::Input) -> Self;

    /// Merges a patch into this record.
    ///
    /// Fields present in the patch replace the stored value; absent fields
    /// are kept. Patches carry no `id`, so the id cannot change.
    fn apply(&mut self, patch: Self::Patch);
}

/// Overwrites `slot` when the patch carries a value for it.
pub fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
