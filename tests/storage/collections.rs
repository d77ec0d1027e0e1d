//! Integration tests for collection CRUD through the store
//!
//! Tests create, find, update, delete, delete-all, and listing.

use rendezvous_foundation::{EntityKind, ErrorKind, RecordId};
use rendezvous_storage::{
    Event, EventPatch, Location, LocationPatch, NewEvent, NewLocation, NewParticipant, NewUser,
    Participant, ParticipantPatch, Store, User, UserPatch,
};

fn new_user(name: &str) -> NewUser {
    NewUser {
        username: name.into(),
        email: format!("{name}@example.com"),
    }
}

fn new_location(name: &str) -> NewLocation {
    NewLocation {
        name: name.into(),
        desc: format!("{name} venue"),
        lat: 41.0,
        lng: 29.0,
    }
}

fn new_event(title: &str, user_id: RecordId, location_id: RecordId) -> NewEvent {
    NewEvent {
        title: title.into(),
        desc: "desc".into(),
        date: "2024-06-01".into(),
        from: "09:00".into(),
        to: "10:00".into(),
        location_id,
        user_id,
    }
}

// =============================================================================
// Create / Find
// =============================================================================

#[test]
fn create_then_find_returns_equal_record() {
    let mut store = Store::new();

    let user = store.create::<User>(new_user("ada")).unwrap();
    let location = store.create::<Location>(new_location("Hall")).unwrap();
    let event = store.create::<Event>(new_event("Kickoff", user.id, location.id)).unwrap();

    assert_eq!(store.find::<User>(user.id), Some(&user));
    assert_eq!(store.find::<Location>(location.id), Some(&location));
    assert_eq!(store.find::<Event>(event.id), Some(&event));
}

#[test]
fn find_missing_is_none() {
    let store = Store::new();
    assert!(store.find::<Participant>(RecordId::new(1)).is_none());
}

#[test]
fn list_preserves_insertion_order() {
    let mut store = Store::new();
    for name in ["c", "a", "b"] {
        store.create::<User>(new_user(name)).unwrap();
    }

    let names: Vec<_> = store
        .list::<User>()
        .iter()
        .map(|u| u.username.clone())
        .collect();

    assert_eq!(names, ["c", "a", "b"]);
}

// =============================================================================
// Update
// =============================================================================

#[test]
fn update_changes_only_present_fields() {
    let mut store = Store::new();
    let location = store.create::<Location>(new_location("Hall")).unwrap();

    let updated = store
        .update::<Location>(
            location.id,
            LocationPatch {
                lat: Some(12.5),
                ..LocationPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.id, location.id);
    assert_eq!(updated.name, location.name);
    assert_eq!(updated.desc, location.desc);
    assert!((updated.lat - 12.5).abs() < f64::EPSILON);
    assert!((updated.lng - location.lng).abs() < f64::EPSILON);
    assert_eq!(store.find::<Location>(location.id), Some(&updated));
}

#[test]
fn update_can_repoint_foreign_keys() {
    let mut store = Store::new();
    let ada = store.create::<User>(new_user("ada")).unwrap();
    let bob = store.create::<User>(new_user("bob")).unwrap();
    let event = store.create::<Event>(new_event("Kickoff", ada.id, RecordId::new(1))).unwrap();

    let updated = store
        .update::<Event>(
            event.id,
            EventPatch {
                user_id: Some(bob.id),
                ..EventPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.user_id, bob.id);
    assert_eq!(updated.title, "Kickoff");
}

#[test]
fn empty_patch_is_a_no_op() {
    let mut store = Store::new();
    let user = store.create::<User>(new_user("ada")).unwrap();

    let updated = store.update::<User>(user.id, UserPatch::default()).unwrap();

    assert_eq!(updated, user);
}

#[test]
fn update_missing_fails_without_change() {
    let mut store = Store::new();
    store
        .create::<Participant>(NewParticipant {
            user_id: RecordId::new(1),
            event_id: RecordId::new(1),
        })
        .unwrap();
    let before = store.list::<Participant>();

    let err = store
        .update::<Participant>(
            RecordId::new(99),
            ParticipantPatch {
                user_id: Some(RecordId::new(2)),
                ..ParticipantPatch::default()
            },
        )
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ErrorKind::NotFound {
            kind: EntityKind::Participant,
            ..
        }
    ));
    assert_eq!(store.list::<Participant>(), before);
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn delete_returns_record_and_keeps_order() {
    let mut store = Store::new();
    let a = store.create::<User>(new_user("a")).unwrap();
    let b = store.create::<User>(new_user("b")).unwrap();
    let c = store.create::<User>(new_user("c")).unwrap();

    let removed = store.delete::<User>(b.id).unwrap();

    assert_eq!(removed, b);
    assert_eq!(store.list::<User>().into_iter().collect::<Vec<_>>(), vec![a, c]);
}

#[test]
fn delete_missing_fails_without_change() {
    let mut store = Store::new();
    store.create::<User>(new_user("a")).unwrap();

    let err = store.delete::<User>(RecordId::new(7)).unwrap_err();

    assert_eq!(err.to_string(), "User not found: 7");
    assert_eq!(store.count(EntityKind::User), 1);
}

#[test]
fn delete_all_counts_and_is_idempotent() {
    let mut store = Store::new();
    for i in 0..4 {
        store.create::<Location>(new_location(&format!("L{i}"))).unwrap();
    }

    assert_eq!(store.delete_all::<Location>(), 4);
    assert_eq!(store.count(EntityKind::Location), 0);
    assert_eq!(store.delete_all::<Location>(), 0);
}

#[test]
fn snapshot_survives_later_mutation() {
    let mut store = Store::new();
    let user = store.create::<User>(new_user("a")).unwrap();
    let snapshot = store.list::<User>();

    store
        .update::<User>(
            user.id,
            UserPatch {
                email: Some("new@example.com".into()),
                ..UserPatch::default()
            },
        )
        .unwrap();
    store.create::<User>(new_user("b")).unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].email, "a@example.com");
}
