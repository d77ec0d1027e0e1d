//! Integration tests for Error types
//!
//! Tests error construction, display, and context.

use rendezvous_foundation::{EntityKind, Error, ErrorContext, ErrorKind, RecordId};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn not_found_for_each_kind() {
    for kind in EntityKind::ALL {
        let err = Error::not_found(kind, RecordId::new(3));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), format!("{} not found: 3", kind.name()));
    }
}

#[test]
fn duplicate_id_message() {
    let err = Error::duplicate_id(EntityKind::Location, RecordId::new(2));
    assert!(matches!(err.kind, ErrorKind::DuplicateId { .. }));
    assert_eq!(err.to_string(), "duplicate Location id: 2");
}

#[test]
fn invalid_id_quotes_input() {
    let err = Error::invalid_id("abc");
    assert_eq!(err.to_string(), "invalid id: \"abc\"");
}

#[test]
fn unknown_operation_message() {
    let err = Error::new(ErrorKind::UnknownOperation("fetchUser".into()));
    assert_eq!(err.to_string(), "unknown operation: fetchUser");
}

#[test]
fn errors_are_std_errors() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&Error::new(ErrorKind::Io("disk".into())));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_is_optional() {
    let err = Error::new(ErrorKind::Seed("bad".into()));
    assert!(err.context.is_none());
}

#[test]
fn operation_then_line() {
    let err = Error::not_found(EntityKind::User, RecordId::new(1))
        .in_operation("deleteUser")
        .at_line("cleanup.ops", 12);

    let ctx = err.context.unwrap();
    assert_eq!(ctx.operation.as_deref(), Some("deleteUser"));
    assert_eq!(ctx.source.as_deref(), Some("cleanup.ops"));
    assert_eq!(ctx.line, Some(12));
}

#[test]
fn line_without_operation() {
    let ctx = ErrorContext::new().with_source("seed.ops").with_line(3);
    assert_eq!(ctx.to_string(), "at seed.ops:3");
}

#[test]
fn context_does_not_change_message() {
    let err = Error::not_found(EntityKind::Event, RecordId::new(8)).in_operation("getEvent");
    assert_eq!(err.to_string(), "Event not found: 8");
}
