//! Integration tests for relationship resolution
//!
//! Tests many-to-one and one-to-many resolution, dangling references, and
//! the relationship registry.

use rendezvous_foundation::{EntityKind, ErrorKind, RecordId};
use rendezvous_storage::relationship::{
    self, EVENT_LOCATION, EVENT_PARTICIPANTS, EVENT_USER, LOCATION_EVENTS, PARTICIPANT_EVENT,
    PARTICIPANT_USER, USER_EVENTS,
};
use rendezvous_storage::{
    Cardinality, Event, Location, NewEvent, NewLocation, NewParticipant, NewUser, Participant,
    Store, User,
};

fn new_event(user_id: RecordId, location_id: RecordId) -> NewEvent {
    NewEvent {
        title: "Meetup".into(),
        desc: "desc".into(),
        date: "2024-06-01".into(),
        from: "09:00".into(),
        to: "10:00".into(),
        location_id,
        user_id,
    }
}

struct Fixture {
    store: Store,
    ada: User,
    bob: User,
    hall: Location,
    e1: Event,
    e2: Event,
}

fn fixture() -> Fixture {
    let mut store = Store::new();
    let ada = store
        .create::<User>(NewUser {
            username: "ada".into(),
            email: "ada@example.com".into(),
        })
        .unwrap();
    let bob = store
        .create::<User>(NewUser {
            username: "bob".into(),
            email: "bob@example.com".into(),
        })
        .unwrap();
    let hall = store
        .create::<Location>(NewLocation {
            name: "Hall".into(),
            desc: "Main".into(),
            lat: 0.0,
            lng: 0.0,
        })
        .unwrap();
    let e1 = store.create::<Event>(new_event(ada.id, hall.id)).unwrap();
    let e2 = store.create::<Event>(new_event(bob.id, hall.id)).unwrap();
    Fixture {
        store,
        ada,
        bob,
        hall,
        e1,
        e2,
    }
}

// =============================================================================
// One-to-many
// =============================================================================

#[test]
fn user_events_filter_by_owner() {
    let f = fixture();

    assert_eq!(f.store.related(&USER_EVENTS, &f.ada), vec![&f.e1]);
    assert_eq!(f.store.related(&USER_EVENTS, &f.bob), vec![&f.e2]);
}

#[test]
fn location_events_in_stored_order() {
    let f = fixture();
    assert_eq!(f.store.related(&LOCATION_EVENTS, &f.hall), vec![&f.e1, &f.e2]);
}

#[test]
fn event_participants_empty_until_created() {
    let mut f = fixture();
    assert!(f.store.related(&EVENT_PARTICIPANTS, &f.e1).is_empty());

    let p = f.store
        .create::<Participant>(NewParticipant {
            user_id: f.bob.id,
            event_id: f.e1.id,
        })
        .unwrap();

    assert_eq!(f.store.related(&EVENT_PARTICIPANTS, &f.e1), vec![&p]);
    assert!(f.store.related(&EVENT_PARTICIPANTS, &f.e2).is_empty());
}

#[test]
fn resolution_reflects_current_state() {
    let mut f = fixture();
    assert_eq!(f.store.related(&USER_EVENTS, &f.ada).len(), 1);

    f.store.delete::<Event>(f.e1.id).unwrap();

    assert!(f.store.related(&USER_EVENTS, &f.ada).is_empty());
}

// =============================================================================
// Many-to-one
// =============================================================================

#[test]
fn event_owner_and_location() {
    let f = fixture();

    assert_eq!(f.store.require(&EVENT_USER, &f.e2).unwrap(), &f.bob);
    assert_eq!(f.store.require(&EVENT_LOCATION, &f.e2).unwrap(), &f.hall);
}

#[test]
fn participant_user_and_event() {
    let mut f = fixture();
    let p = f.store
        .create::<Participant>(NewParticipant {
            user_id: f.ada.id,
            event_id: f.e2.id,
        })
        .unwrap();

    assert_eq!(f.store.require(&PARTICIPANT_USER, &p).unwrap(), &f.ada);
    assert_eq!(f.store.require(&PARTICIPANT_EVENT, &p).unwrap(), &f.e2);
}

#[test]
fn deleted_location_dangles() {
    let mut f = fixture();
    f.store.delete::<Location>(f.hall.id).unwrap();

    assert!(f.store.related_one(&EVENT_LOCATION, &f.e1).is_none());
    let err = f.store.require(&EVENT_LOCATION, &f.e1).unwrap_err();

    assert!(matches!(
        err.kind,
        ErrorKind::DanglingReference {
            source_kind: EntityKind::Event,
            relation: "location",
            target_kind: EntityKind::Location,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        format!("Event {}: location references missing Location {}", f.e1.id, f.hall.id)
    );
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn registry_describes_every_field() {
    let all = relationship::schemas();

    let many_to_one = all
        .iter()
        .filter(|s| s.cardinality == Cardinality::ManyToOne)
        .count();
    assert_eq!(many_to_one, 4);
    assert_eq!(all.len() - many_to_one, 3);
}

#[test]
fn registry_per_kind() {
    let names = |kind| {
        relationship::schemas_for(kind)
            .map(|s| s.name)
            .collect::<Vec<_>>()
    };

    assert_eq!(names(EntityKind::User), ["events"]);
    assert_eq!(names(EntityKind::Location), ["events"]);
    assert_eq!(names(EntityKind::Participant), ["user", "event"]);
}

#[test]
fn schema_display() {
    assert_eq!(
        EVENT_USER.schema.to_string(),
        "Event.user: User! (many-to-one, via user_id)"
    );
    assert_eq!(
        EVENT_PARTICIPANTS.schema.to_string(),
        "Event.participants: [Participant] (one-to-many, via event_id)"
    );
}
