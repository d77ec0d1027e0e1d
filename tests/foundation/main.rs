//! Integration tests for Layer 0: Foundation
//!
//! Tests for record identifiers, entity kinds, and error types.

mod errors;
mod ids;
