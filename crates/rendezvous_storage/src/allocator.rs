//! Identity allocation for record collections.
//!
//! Each collection owns an `IdAllocator`. Ids come from a counter that only
//! moves forward, so an id freed by a delete is never handed out again and a
//! stale foreign key can never start pointing at an unrelated new record.

use rendezvous_foundation::RecordId;

/// Hands out fresh record ids for one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    /// The id the next call to [`IdAllocator::allocate`] returns, or `None`
    /// once `u64::MAX` has been handed out or observed.
    next: Option<u64>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Creates an allocator whose first id is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Allocates a fresh id, or returns `None` if the id space is exhausted.
    pub fn allocate(&mut self) -> Option<RecordId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(RecordId::new(id))
    }

    /// Records that `id` is in use, so it is never allocated.
    ///
    /// Used when records arrive with ids already assigned (seed data).
    /// Observing `u64::MAX` exhausts the allocator.
    pub fn observe(&mut self, id: RecordId) {
        if self.next.is_some_and(|next| id.get() >= next) {
            self.next = id.get().checked_add(1);
        }
    }

    /// Returns the id the next allocation will produce, if any is left.
    #[must_use]
    pub const fn peek(&self) -> Option<RecordId> {
        match self.next {
            Some(next) => Some(RecordId::new(next)),
            None => None,
        }
    }

    /// Returns true once no further id can be allocated.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }
}
