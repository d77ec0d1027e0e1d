//! Record identifiers, entity kinds, and errors for Rendezvous.
//!
//! This crate provides:
//! - [`RecordId`] - Numeric record identifiers with string coercion
//! - [`EntityKind`] - The four record kinds held by the store
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod id;
mod kind;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use id::RecordId;
pub use kind::EntityKind;
