//! Error types for the Rendezvous system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::id::RecordId;
use crate::kind::EntityKind;

/// Result alias used throughout Rendezvous.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Rendezvous operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records the failing operation, keeping any location already attached.
    #[must_use]
    pub fn in_operation(mut self, operation: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_operation(operation));
        self
    }

    /// Records the script line that failed, keeping any operation already attached.
    #[must_use]
    pub fn at_line(mut self, source: impl Into<String>, line: usize) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_source(source).with_line(line));
        self
    }

    /// Creates a record not found error.
    #[must_use]
    pub fn not_found(kind: EntityKind, id: RecordId) -> Self {
        Self::new(ErrorKind::NotFound { kind, id })
    }

    /// Creates a duplicate id error.
    #[must_use]
    pub fn duplicate_id(kind: EntityKind, id: RecordId) -> Self {
        Self::new(ErrorKind::DuplicateId { kind, id })
    }

    /// Creates an id space exhausted error.
    #[must_use]
    pub fn id_space_exhausted(kind: EntityKind) -> Self {
        Self::new(ErrorKind::IdSpaceExhausted(kind))
    }

    /// Creates an invalid identifier error.
    #[must_use]
    pub fn invalid_id(text: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidId(text.into()))
    }

    /// Creates an invalid arguments error for the named operation.
    #[must_use]
    pub fn invalid_arguments(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArguments {
            operation: operation.into(),
            message: message.into(),
        })
    }

    /// Returns true if this error reports a missing record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// No record with the given id exists in the collection.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The collection that was searched.
        kind: EntityKind,
        /// The id that was requested.
        id: RecordId,
    },

    /// A mandatory relationship points at a record that does not exist.
    #[error("{source_kind} {source_id}: {relation} references missing {target_kind} {target_id}")]
    DanglingReference {
        /// Kind of the record holding the reference.
        source_kind: EntityKind,
        /// Id of the record holding the reference.
        source_id: RecordId,
        /// Name of the relationship field being resolved.
        relation: &'static str,
        /// Kind of the referenced record.
        target_kind: EntityKind,
        /// The referenced id that has no record.
        target_id: RecordId,
    },

    /// Two records in one collection share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// The collection holding the duplicates.
        kind: EntityKind,
        /// The repeated id.
        id: RecordId,
    },

    /// Every id of a collection has been handed out or observed.
    #[error("no {0} ids left to allocate")]
    IdSpaceExhausted(EntityKind),

    /// Text that should denote an identifier is not a non-negative integer.
    #[error("invalid id: {0:?}")]
    InvalidId(String),

    /// The requested operation name is not part of the operation surface.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Operation arguments are missing or malformed.
    #[error("invalid arguments for {operation}: {message}")]
    InvalidArguments {
        /// The operation being parsed.
        operation: String,
        /// What was wrong with the arguments.
        message: String,
    },

    /// Seed data could not be decoded.
    #[error("seed error: {0}")]
    Seed(String),

    /// A record or response could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File system failure.
    #[error("io error: {0}")]
    Io(String),

    /// The interactive console failed.
    #[error("console error: {0}")]
    Console(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Script file or other input source.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// The operation that failed.
    pub operation: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Sets the failing operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
            wrote = true;
        }
        if let Some(source) = &self.source {
            if wrote {
                f.write_str(" ")?;
            }
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        Ok(())
    }
}
