//! Integration tests for the named operation surface
//!
//! Tests every verb for every kind through `Session::run`.

use rendezvous_foundation::{EntityKind, ErrorKind};
use rendezvous_runtime::{Operation, Session};
use serde_json::{Value, json};

fn sample_data(kind: EntityKind) -> Value {
    match kind {
        EntityKind::User => json!({"username": "ada", "email": "ada@example.com"}),
        EntityKind::Location => json!({"name": "Hall", "desc": "Main", "lat": 1.5, "lng": -2.5}),
        EntityKind::Event => json!({
            "title": "Kickoff", "desc": "First", "date": "2024-01-10",
            "from": "10:00", "to": "12:00", "location_id": 1, "user_id": 1
        }),
        EntityKind::Participant => json!({"user_id": 1, "event_id": 1}),
    }
}

fn sample_patch(kind: EntityKind) -> (&'static str, Value) {
    match kind {
        EntityKind::User => ("email", json!("ada@lovelace.dev")),
        EntityKind::Location => ("desc", json!("Renovated")),
        EntityKind::Event => ("title", json!("Renamed")),
        EntityKind::Participant => ("event_id", json!(2)),
    }
}

// =============================================================================
// CRUD for every kind
// =============================================================================

#[test]
fn create_get_update_delete_for_every_kind() {
    for kind in EntityKind::ALL {
        let mut session = Session::new();
        let singular = kind.name();

        let created = session
            .run(&format!("create{singular}"), &json!({"data": sample_data(kind)}))
            .unwrap();
        assert_eq!(created["id"], json!(1), "{singular}");

        let fetched = session
            .run(&format!("get{singular}"), &json!({"id": "1"}))
            .unwrap();
        assert_eq!(fetched, created, "{singular}");

        let (field, value) = sample_patch(kind);
        let updated = session
            .run(
                &format!("update{singular}"),
                &json!({"id": 1, "data": {field: value.clone()}}),
            )
            .unwrap();
        assert_eq!(updated[field], value, "{singular}");
        for (key, original) in created.as_object().unwrap() {
            if key != field {
                assert_eq!(&updated[key], original, "{singular}.{key}");
            }
        }

        let deleted = session
            .run(&format!("delete{singular}"), &json!({"id": 1}))
            .unwrap();
        assert_eq!(deleted, updated, "{singular}");

        let gone = session
            .run(&format!("get{singular}"), &json!({"id": 1}))
            .unwrap();
        assert_eq!(gone, Value::Null, "{singular}");
    }
}

#[test]
fn list_and_delete_all_for_every_kind() {
    for kind in EntityKind::ALL {
        let mut session = Session::new();
        for _ in 0..3 {
            session
                .run(&format!("create{}", kind.name()), &json!({"data": sample_data(kind)}))
                .unwrap();
        }

        let listed = session
            .run(&format!("list{}", kind.plural()), &Value::Null)
            .unwrap();
        let ids: Vec<_> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].clone())
            .collect();
        assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);

        let removed = session
            .run(&format!("deleteAll{}", kind.plural()), &Value::Null)
            .unwrap();
        assert_eq!(removed, json!({"count": 3}));
        assert_eq!(session.store().count(kind), 0);
    }
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn missing_targets_are_not_found() {
    let mut session = Session::new();
    session
        .run("createUser", &json!({"data": sample_data(EntityKind::User)}))
        .unwrap();

    for (name, args) in [
        ("updateUser", json!({"id": 2, "data": {"username": "x"}})),
        ("deleteUser", json!({"id": "2"})),
    ] {
        let err = session.run(name, &args).unwrap_err();
        assert!(err.is_not_found(), "{name}");
        assert_eq!(err.to_string(), "User not found: 2");
    }

    assert_eq!(session.store().count(EntityKind::User), 1);
}

#[test]
fn unknown_operation() {
    let mut session = Session::new();
    let err = session.run("dropEverything", &Value::Null).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownOperation(ref name) if name == "dropEverything"));
}

#[test]
fn create_rejects_unknown_fields_and_missing_fields() {
    let mut session = Session::new();

    let err = session
        .run(
            "createUser",
            &json!({"data": {"username": "a", "email": "b", "role": "admin"}}),
        )
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArguments { .. }));

    let err = session
        .run("createParticipant", &json!({"data": {"user_id": 1}}))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArguments { .. }));

    assert_eq!(session.store().count(EntityKind::User), 0);
}

#[test]
fn patch_cannot_set_id() {
    let mut session = Session::new();
    session
        .run("createUser", &json!({"data": sample_data(EntityKind::User)}))
        .unwrap();

    let err = session
        .run("updateUser", &json!({"id": 1, "data": {"id": 5}}))
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::InvalidArguments { .. }));
    assert!(session.run("getUser", &json!({"id": 1})).unwrap().is_object());
}

#[test]
fn null_patch_fields_keep_values() {
    let mut session = Session::new();
    session
        .run("createUser", &json!({"data": sample_data(EntityKind::User)}))
        .unwrap();

    let updated = session
        .run(
            "updateUser",
            &json!({"id": 1, "data": {"username": null, "email": "new@example.com"}}),
        )
        .unwrap();

    assert_eq!(updated["username"], "ada");
    assert_eq!(updated["email"], "new@example.com");
}

// =============================================================================
// Operation names
// =============================================================================

#[test]
fn every_listed_name_parses() {
    for name in Operation::names() {
        let args = if name.starts_with("list") || name.starts_with("deleteAll") {
            Value::Null
        } else if name.starts_with("create") {
            let kind = EntityKind::from_name(name.trim_start_matches("create")).unwrap();
            json!({"data": sample_data(kind)})
        } else if name.starts_with("update") {
            json!({"id": 1, "data": {}})
        } else {
            json!({"id": 1})
        };

        let op = Operation::parse(&name, &args).unwrap();
        assert_eq!(op.name(), name);
    }
}
