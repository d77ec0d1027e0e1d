//! Integration tests for identity allocation
//!
//! Tests that ids are fresh, monotonic, per-collection, and never reused.

use proptest::prelude::*;
use rendezvous_foundation::{EntityKind, ErrorKind, RecordId};
use rendezvous_storage::{Collection, IdAllocator, NewUser, Store, User};

fn new_user(name: &str) -> NewUser {
    NewUser {
        username: name.into(),
        email: format!("{name}@example.com"),
    }
}

fn seeded_user(id: u64) -> User {
    User {
        id: RecordId::new(id),
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
    }
}

// =============================================================================
// Allocation
// =============================================================================

#[test]
fn ids_start_at_one() {
    let mut allocator = IdAllocator::new();
    assert_eq!(allocator.allocate(), Some(RecordId::new(1)));
    assert_eq!(allocator.allocate(), Some(RecordId::new(2)));
}

#[test]
fn deleted_ids_are_not_reused() {
    let mut users = Collection::<User>::new();
    let a = users.create(new_user("a")).unwrap();
    let b = users.create(new_user("b")).unwrap();
    users.delete(a.id).unwrap();

    let c = users.create(new_user("c")).unwrap();

    assert_eq!(a.id, RecordId::new(1));
    assert_eq!(b.id, RecordId::new(2));
    assert_eq!(c.id, RecordId::new(3));
}

#[test]
fn delete_all_does_not_rewind() {
    let mut store = Store::new();
    store.create::<User>(new_user("a")).unwrap();
    store.create::<User>(new_user("b")).unwrap();
    store.delete_all::<User>();

    let next = store.create::<User>(new_user("c")).unwrap();

    assert_eq!(next.id, RecordId::new(3));
}

#[test]
fn seeded_collection_continues_after_max() {
    let mut users = Collection::from_records([seeded_user(4), seeded_user(9), seeded_user(2)]).unwrap();

    assert_eq!(users.next_id(), Some(RecordId::new(10)));
    assert_eq!(users.create(new_user("n")).unwrap().id, RecordId::new(10));
}

#[test]
fn seeded_duplicates_are_rejected() {
    let err = Collection::from_records([seeded_user(1), seeded_user(1)]).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateId {
            kind: EntityKind::User,
            ..
        }
    ));
}

#[test]
fn insert_rejects_taken_id() {
    let mut users = Collection::<User>::new();
    users.create(new_user("a")).unwrap();

    assert!(users.insert(seeded_user(1)).is_err());
    assert!(users.insert(seeded_user(5)).is_ok());
    assert_eq!(users.create(new_user("b")).unwrap().id, RecordId::new(6));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn fresh_ids_never_collide(ops in prop::collection::vec(any::<bool>(), 1..60)) {
        let mut users = Collection::<User>::new();
        let mut seen = std::collections::HashSet::new();

        for create in ops {
            if create || users.is_empty() {
                let user = users.create(new_user("p")).unwrap();
                prop_assert!(seen.insert(user.id), "id {} handed out twice", user.id);
            } else {
                let first = users.iter().next().map(|u| u.id);
                if let Some(first) = first {
                    users.delete(first).unwrap();
                }
            }
        }
    }
}
