//! Rendezvous - In-memory store for users, locations, events, and participants
//!
//! This crate re-exports all layers of the Rendezvous system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: rendezvous_runtime    - Operations, seed loading, console, CLI
//! Layer 1: rendezvous_storage    - Collections, id allocation, relationships
//! Layer 0: rendezvous_foundation - Core types (RecordId, EntityKind, Error)
//! ```

pub use rendezvous_foundation as foundation;
pub use rendezvous_runtime as runtime;
pub use rendezvous_storage as storage;
