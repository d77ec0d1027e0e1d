//! Integration tests for record identifiers and entity kinds
//!
//! Tests id coercion from text and JSON, ordering, and kind naming.

use proptest::prelude::*;
use rendezvous_foundation::{EntityKind, ErrorKind, RecordId};

// =============================================================================
// Coercion
// =============================================================================

#[test]
fn string_and_number_forms_are_equal() {
    let from_text: RecordId = "7".parse().unwrap();
    let padded: RecordId = " 7 ".parse().unwrap();
    let from_number = RecordId::from(7);

    assert_eq!(from_text, from_number);
    assert_eq!(padded, from_number);
}

#[test]
fn non_numeric_text_is_invalid() {
    for text in ["", "abc", "-1", "1.5", "0x10", "7a"] {
        let err = RecordId::parse(text).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::InvalidId(_)),
            "{text:?} should be invalid"
        );
    }
}

#[test]
fn json_numbers_and_strings_decode_to_same_id() {
    let a: RecordId = serde_json::from_str("12").unwrap();
    let b: RecordId = serde_json::from_str("\"12\"").unwrap();
    let c: RecordId = serde_json::from_str("12.0").unwrap();

    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn json_rejects_negative_and_fractional() {
    assert!(serde_json::from_str::<RecordId>("-3").is_err());
    assert!(serde_json::from_str::<RecordId>("2.5").is_err());
    assert!(serde_json::from_str::<RecordId>("\"two\"").is_err());
}

#[test]
fn ids_serialize_as_numbers() {
    assert_eq!(serde_json::to_string(&RecordId::new(5)).unwrap(), "5");
}

#[test]
fn display_and_debug() {
    let id = RecordId::new(42);
    assert_eq!(id.to_string(), "42");
    assert_eq!(format!("{id:?}"), "RecordId(42)");
}

// =============================================================================
// Entity Kinds
// =============================================================================

#[test]
fn kinds_round_trip_through_names() {
    for kind in EntityKind::ALL {
        assert_eq!(EntityKind::from_name(kind.name()), Some(kind));
        assert_eq!(EntityKind::from_plural(kind.plural()), Some(kind));
    }
}

#[test]
fn kind_names_are_case_sensitive() {
    assert_eq!(EntityKind::from_name("user"), None);
    assert_eq!(EntityKind::from_plural("Users"), Some(EntityKind::User));
    assert_eq!(EntityKind::from_plural("User"), None);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn parse_accepts_any_decimal(n in any::<u64>()) {
        prop_assert_eq!(RecordId::parse(&n.to_string()).unwrap(), RecordId::new(n));
    }

    #[test]
    fn ordering_follows_numeric_value(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(RecordId::new(a).cmp(&RecordId::new(b)), a.cmp(&b));
    }
}
