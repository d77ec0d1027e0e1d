//! Record collections, identity allocation, and relationship resolution for Rendezvous.
//!
//! This crate provides:
//! - [`IdAllocator`] - Monotonic per-collection identity allocation
//! - [`Collection`] - Generic insertion-ordered CRUD over one record kind
//! - [`BelongsTo`] and [`HasMany`] - Relationship descriptors and their resolvers
//! - [`Store`] - The four collections and the query dispatcher

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod allocator;
pub mod collection;
pub mod model;
pub mod record;
pub mod relationship;
pub mod schema;
pub mod store;

pub use allocator::IdAllocator;
pub use collection::Collection;
pub use model::{
    Event, EventPatch, Location, LocationPatch, NewEvent, NewLocation, NewParticipant, NewUser,
    Participant, ParticipantPatch, User, UserPatch,
};
pub use record::Record;
pub use relationship::{BelongsTo, HasMany};
pub use schema::{Cardinality, RelationshipSchema};
pub use store::{Store, Table};
