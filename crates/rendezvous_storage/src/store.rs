//! The entity store and query dispatcher.
//!
//! The `Store` owns one [`Collection`] per entity kind. Nothing outside the
//! store mutates a collection; every read and write goes through the generic
//! methods below, which pick the collection from the record type via
//! [`Table`].

use rendezvous_foundation::{EntityKind, RecordId, Result};

use crate::collection::Collection;
use crate::model::{Event, Location, Participant, User};
use crate::record::Record;
use crate::relationship::{BelongsTo, HasMany};

/// A record type with a home collection in the [`Store`].
pub trait Table: Record {
    /// Returns this type's collection.
    fn collection(store: &Store) -> &Collection<Self>;

    /// Returns this type's collection for mutation.
    fn collection_mut(store: &mut Store) -> &mut Collection<Self>;
}

impl Table for User {
    fn collection(store: &Store) -> &Collection<Self> {
        &store.users
    }

    fn collection_mut(store: &mut Store) -> &mut Collection<Self> {
        &mut store.users
    }
}

impl Table for Location {
    fn collection(store: &Store) -> &Collection<Self> {
        &store.locations
    }

    fn collection_mut(store: &mut Store) -> &mut Collection<Self> {
        &mut store.locations
    }
}

impl Table for Event {
    fn collection(store: &Store) -> &Collection<Self> {
        &store.events
    }

    fn collection_mut(store: &mut Store) -> &mut Collection<Self> {
        &mut store.events
    }
}

impl Table for Participant {
    fn collection(store: &Store) -> &Collection<Self> {
        &store.participants
    }

    fn collection_mut(store: &mut Store) -> &mut Collection<Self> {
        &mut store.participants
    }
}

/// The four record collections.
///
/// Clone is cheap: collections share structure until one side mutates.
#[derive(Clone, Debug, Default)]
pub struct Store {
    users: Collection<User>,
    locations: Collection<Location>,
    events: Collection<Event>,
    participants: Collection<Participant>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from prepared collections.
    #[must_use]
    pub fn from_collections(
        users: Collection<User>,
        locations: Collection<Location>,
        events: Collection<Event>,
        participants: Collection<Participant>,
    ) -> Self {
        Self {
            users,
            locations,
            events,
            participants,
        }
    }

    /// Returns the user collection.
    #[must_use]
    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    /// Returns the location collection.
    #[must_use]
    pub fn locations(&self) -> &Collection<Location> {
        &self.locations
    }

    /// Returns the event collection.
    #[must_use]
    pub fn events(&self) -> &Collection<Event> {
        &self.events
    }

    /// Returns the participant collection.
    #[must_use]
    pub fn participants(&self) -> &Collection<Participant> {
        &self.participants
    }

    /// Returns the collection for `R`.
    #[must_use]
    pub fn collection<R: Table>(&self) -> &Collection<R> {
        R::collection(self)
    }

    /// Number of records held for `kind`.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::User => self.users.len(),
            EntityKind::Location => self.locations.len(),
            EntityKind::Event => self.events.len(),
            EntityKind::Participant => self.participants.len(),
        }
    }

    // -------------------------------------------------------------------------
    // CRUD
    // -------------------------------------------------------------------------

    /// Creates a record of type `R` under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`rendezvous_foundation::ErrorKind::IdSpaceExhausted`] if the
    /// collection has no unused id left.
    pub fn create<R: Table>(&mut self, input: R::Input) -> Result<R> {
        R::collection_mut(self).create(input)
    }

    /// Merges a patch into the `R` record with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`rendezvous_foundation::ErrorKind::NotFound`] if no such record exists.
    pub fn update<R: Table>(&mut self, id: RecordId, patch: R::Patch) -> Result<R> {
        R::collection_mut(self).update(id, patch)
    }

    /// Removes the `R` record with the given id and returns it.
    ///
    /// Records in other collections that reference it are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`rendezvous_foundation::ErrorKind::NotFound`] if no such record exists.
    pub fn delete<R: Table>(&mut self, id: RecordId) -> Result<R> {
        R::collection_mut(self).delete(id)
    }

    /// Removes every `R` record and returns how many were removed.
    pub fn delete_all<R: Table>(&mut self) -> usize {
        R::collection_mut(self).clear()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Finds the `R` record with the given id.
    #[must_use]
    pub fn find<R: Table>(&self, id: RecordId) -> Option<&R> {
        R::collection(self).find(id)
    }

    /// Returns every `R` record in stored order, as a snapshot.
    #[must_use]
    pub fn list<R: Table>(&self) -> im::Vector<R> {
        R::collection(self).snapshot()
    }

    // -------------------------------------------------------------------------
    // Relationships
    // -------------------------------------------------------------------------

    /// Resolves a mandatory many-to-one relationship.
    ///
    /// # Errors
    ///
    /// Returns [`rendezvous_foundation::ErrorKind::DanglingReference`] if the
    /// target record does not exist.
    pub fn require<S: Record, T: Table>(
        &self,
        relation: &BelongsTo<S, T>,
        source: &S,
    ) -> Result<&T> {
        relation.require(source, T::collection(self))
    }

    /// Resolves an optional many-to-one relationship.
    #[must_use]
    pub fn related_one<S: Record, T: Table>(
        &self,
        relation: &BelongsTo<S, T>,
        source: &S,
    ) -> Option<&T> {
        relation.find(source, T::collection(self))
    }

    /// Resolves a one-to-many relationship.
    #[must_use]
    pub fn related<S: Record, T: Table>(&self, relation: &HasMany<S, T>, source: &S) -> Vec<&T> {
        relation.resolve(source, T::collection(self))
    }
}
