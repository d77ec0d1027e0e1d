//! Relationship descriptors and resolution by linear scan.
//!
//! Relationships are not stored. A field such as `Event.user` is computed
//! on demand from the foreign key the record already carries, every time it
//! is requested. Foreign keys are never checked on write, so a target may
//! be missing; [`BelongsTo::require`] turns that into
//! [`ErrorKind::DanglingReference`].

use std::marker::PhantomData;

use rendezvous_foundation::{EntityKind, Error, ErrorKind, RecordId, Result};

use crate::collection::Collection;
use crate::model::{Event, Location, Participant, User};
use crate::record::Record;
use crate::schema::RelationshipSchema;

/// A many-to-one relationship: the source record holds the target's id.
pub struct BelongsTo<S, T> {
    /// Field description.
    pub schema: RelationshipSchema,
    foreign_key: fn(&S) -> RecordId,
    target: PhantomData<fn() -> T>,
}

impl<S, T> BelongsTo<S, T> {
    /// Creates a descriptor reading the key with `foreign_key`.
    #[must_use]
    pub const fn new(schema: RelationshipSchema, foreign_key: fn(&S) -> RecordId) -> Self {
        Self {
            schema,
            foreign_key,
            target: PhantomData,
        }
    }
}

impl<S: Record, T: Record> BelongsTo<S, T> {
    /// Returns the id the source points at.
    pub fn target_id(&self, source: &S) -> RecordId {
        (self.foreign_key)(source)
    }

    /// Finds the target record, if it exists.
    pub fn find<'a>(&self, source: &S, targets: &'a Collection<T>) -> Option<&'a T> {
        targets.find(self.target_id(source))
    }

    /// Finds the target record, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DanglingReference`] if the foreign key names a
    /// record that is not in `targets`.
    pub fn require<'a>(&self, source: &S, targets: &'a Collection<T>) -> Result<&'a T> {
        let target_id = self.target_id(source);
        targets.find(target_id).ok_or_else(|| {
            tracing::warn!(
                relation = %self.schema.qualified_name(),
                source_id = %source.id(),
                %target_id,
                "dangling reference"
            );
            Error::new(ErrorKind::DanglingReference {
                source_kind: S::KIND,
                source_id: source.id(),
                relation: self.schema.name,
                target_kind: T::KIND,
                target_id,
            })
        })
    }
}

/// A one-to-many relationship: each target record holds the source's id.
pub struct HasMany<S, T> {
    /// Field description.
    pub schema: RelationshipSchema,
    foreign_key: fn(&T) -> RecordId,
    source: PhantomData<fn() -> S>,
}

impl<S, T> HasMany<S, T> {
    /// Creates a descriptor reading the back-reference with `foreign_key`.
    #[must_use]
    pub const fn new(schema: RelationshipSchema, foreign_key: fn(&T) -> RecordId) -> Self {
        Self {
            schema,
            foreign_key,
            source: PhantomData,
        }
    }
}

impl<S: Record, T: Record> HasMany<S, T> {
    /// Collects every target pointing at `source`, in stored order.
    pub fn resolve<'a>(&self, source: &S, targets: &'a Collection<T>) -> Vec<&'a T> {
        let id = source.id();
        targets
            .iter()
            .filter(|target| (self.foreign_key)(target) == id)
            .collect()
    }

    /// Counts the targets pointing at `source`.
    pub fn count(&self, source: &S, targets: &Collection<T>) -> usize {
        let id = source.id();
        targets
            .iter()
            .filter(|target| (self.foreign_key)(target) == id)
            .count()
    }
}

fn event_user_id(event: &Event) -> RecordId {
    event.user_id
}

fn event_location_id(event: &Event) -> RecordId {
    event.location_id
}

fn participant_user_id(participant: &Participant) -> RecordId {
    participant.user_id
}

fn participant_event_id(participant: &Participant) -> RecordId {
    participant.event_id
}

/// `Event.user`: the user who owns the event.
pub const EVENT_USER: BelongsTo<Event, User> = BelongsTo::new(
    RelationshipSchema::many_to_one("user", EntityKind::Event, EntityKind::User, "user_id"),
    event_user_id,
);

/// `Event.location`: where the event is held.
pub const EVENT_LOCATION: BelongsTo<Event, Location> = BelongsTo::new(
    RelationshipSchema::many_to_one(
        "location",
        EntityKind::Event,
        EntityKind::Location,
        "location_id",
    ),
    event_location_id,
);

/// `Participant.user`: the attending user.
pub const PARTICIPANT_USER: BelongsTo<Participant, User> = BelongsTo::new(
    RelationshipSchema::many_to_one("user", EntityKind::Participant, EntityKind::User, "user_id"),
    participant_user_id,
);

/// `Participant.event`: the attended event.
pub const PARTICIPANT_EVENT: BelongsTo<Participant, Event> = BelongsTo::new(
    RelationshipSchema::many_to_one(
        "event",
        EntityKind::Participant,
        EntityKind::Event,
        "event_id",
    ),
    participant_event_id,
);

/// `User.events`: events the user owns.
pub const USER_EVENTS: HasMany<User, Event> = HasMany::new(
    RelationshipSchema::one_to_many("events", EntityKind::User, EntityKind::Event, "user_id"),
    event_user_id,
);

/// `Location.events`: events held at the location.
pub const LOCATION_EVENTS: HasMany<Location, Event> = HasMany::new(
    RelationshipSchema::one_to_many(
        "events",
        EntityKind::Location,
        EntityKind::Event,
        "location_id",
    ),
    event_location_id,
);

/// `Event.participants`: attendance records for the event.
pub const EVENT_PARTICIPANTS: HasMany<Event, Participant> = HasMany::new(
    RelationshipSchema::one_to_many(
        "participants",
        EntityKind::Event,
        EntityKind::Participant,
        "event_id",
    ),
    participant_event_id,
);

/// Every relationship field, grouped by source kind.
#[must_use]
pub fn schemas() -> [RelationshipSchema; 7] {
    [
        USER_EVENTS.schema,
        LOCATION_EVENTS.schema,
        EVENT_USER.schema,
        EVENT_LOCATION.schema,
        EVENT_PARTICIPANTS.schema,
        PARTICIPANT_USER.schema,
        PARTICIPANT_EVENT.schema,
    ]
}

/// Relationship fields readable from records of `kind`.
pub fn schemas_for(kind: EntityKind) -> impl Iterator<Item = RelationshipSchema> {
    schemas().into_iter().filter(move |schema| schema.source == kind)
}

/// Finds the relationship field `name` on records of `kind`.
#[must_use]
pub fn schema(kind: EntityKind, name: &str) -> Option<RelationshipSchema> {
    schemas_for(kind).find(|schema| schema.name == name)
}

/// Finds a relationship field by its qualified name, e.g. `Event.user`.
#[must_use]
pub fn schema_by_qualified_name(qualified: &str) -> Option<RelationshipSchema> {
    let (kind, name) = qualified.split_once('.')?;
    schema(EntityKind::from_name(kind)?, name)
}
