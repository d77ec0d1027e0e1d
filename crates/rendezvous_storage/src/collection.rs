//! Generic CRUD over one record kind.
//!
//! A [`Collection`] keeps its records in insertion order and owns the
//! allocator for their ids. The same code serves users, locations, events
//! and participants; the record's [`Record::KIND`] only shows up in errors
//! and log events.

use std::collections::HashSet;

use rendezvous_foundation::{Error, RecordId, Result};

use crate::allocator::IdAllocator;
use crate::record::Record;

/// Insertion-ordered records of one kind, keyed by a unique id.
///
/// Records live in a persistent vector, so [`Collection::snapshot`] is O(1)
/// and later mutations never show through a snapshot already taken.
#[derive(Clone, Debug)]
pub struct Collection<R: Record> {
    records: im::Vector<R>,
    ids: IdAllocator,
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Collection<R> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: im::Vector::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Builds a collection from records that already carry ids.
    ///
    /// Order is preserved. The allocator is advanced past the largest id.
    ///
    /// # Errors
    ///
    /// Returns [`rendezvous_foundation::ErrorKind::DuplicateId`] if two
    /// records share an id.
    pub fn from_records(records: impl IntoIterator<Item = R>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut collection = Self::new();
        for record in records {
            let id = record.id();
            if !seen.insert(id) {
                return Err(Error::duplicate_id(R::KIND, id));
            }
            collection.ids.observe(id);
            collection.records.push_back(record);
        }
        Ok(collection)
    }

    /// Appends a fully formed record and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`rendezvous_foundation::ErrorKind::DuplicateId`] if a record
    /// with the same id is already stored.
    pub fn insert(&mut self, record: R) -> Result<R> {
        let id = record.id();
        if self.contains(id) {
            return Err(Error::duplicate_id(R::KIND, id));
        }
        self.ids.observe(id);
        self.records.push_back(record.clone());
        Ok(record)
    }

    /// Creates a record from `input` under a freshly allocated id.
    ///
    /// # Errors
    ///
    /// Returns [`rendezvous_foundation::ErrorKind::IdSpaceExhausted`] if no
    /// unused id is left. The collection is left untouched.
    pub fn create(&mut self, input: R::Input) -> Result<R> {
        let Some(id) = self.ids.allocate() else {
            tracing::warn!(kind = %R::KIND, "id space exhausted");
            return Err(Error::id_space_exhausted(R::KIND));
        };
        let record = R::from_input(id, input);
        self.records.push_back(record.clone());
        tracing::debug!(kind = %R::KIND, %id, "created record");
        Ok(record)
    }

    /// Merges `patch` into the record with the given id and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`rendezvous_foundation::ErrorKind::NotFound`] if no record
    /// has that id. The collection is left untouched.
    pub fn update(&mut self, id: RecordId, patch: R::Patch) -> Result<R> {
        let index = self.position(id)?;
        let record = self
            .records
            .get_mut(index)
            .ok_or_else(|| Error::not_found(R::KIND, id))?;
        record.apply(patch);
        tracing::debug!(kind = %R::KIND, %id, "updated record");
        Ok(record.clone())
    }

    /// Removes the record with the given id and returns it.
    ///
    /// Remaining records keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`rendezvous_foundation::ErrorKind::NotFound`] if no record
    /// has that id. The collection is left untouched.
    pub fn delete(&mut self, id: RecordId) -> Result<R> {
        let index = self.position(id)?;
        let record = self.records.remove(index);
        tracing::debug!(kind = %R::KIND, %id, "deleted record");
        Ok(record)
    }

    /// Removes every record and returns how many were removed.
    ///
    /// The id counter is not rewound.
    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        tracing::info!(kind = %R::KIND, count, "cleared collection");
        count
    }

    /// Finds the record with the given id.
    #[must_use]
    pub fn find(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Returns true if a record with the given id is stored.
    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.find(id).is_some()
    }

    /// Iterates over records in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    /// Returns the records in stored order as an independent snapshot.
    #[must_use]
    pub fn snapshot(&self) -> im::Vector<R> {
        self.records.clone()
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the id the next [`Collection::create`] will assign, if any.
    #[must_use]
    pub fn next_id(&self) -> Option<RecordId> {
        self.ids.peek()
    }

    fn position(&self, id: RecordId) -> Result<usize> {
        self.records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| Error::not_found(R::KIND, id))
    }
}
