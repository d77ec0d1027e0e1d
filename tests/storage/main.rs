//! Integration tests for Layer 1: Storage
//!
//! Tests for id allocation, collection CRUD, relationships, and the store.

mod allocation;
mod collections;
mod relationships;
