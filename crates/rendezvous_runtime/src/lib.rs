//! Operation surface, seed loading, and interactive console for Rendezvous.
//!
//! This crate provides:
//! - [`Operation`] - The named operations (`getUser`, `createEvent`, ...)
//! - [`Session`] - Executes operations against a [`Store`] and renders results
//! - [`Fields`] - Which relationship fields a rendered record carries
//! - [`Seed`] - JSON fixture loading
//! - [`Repl`] - Interactive console and script runner
//!
//! [`Store`]: rendezvous_storage::Store

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod fields;
pub mod operation;
pub mod repl;
pub mod response;
pub mod seed;
pub mod session;
pub mod view;

pub use config::Config;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use fields::Fields;
pub use operation::{Input, Operation, Patch, Request};
pub use repl::{Outcome, Repl};
pub use response::{Entity, Response};
pub use seed::Seed;
pub use session::Session;
