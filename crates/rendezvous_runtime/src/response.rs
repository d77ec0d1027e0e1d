//! Operation results.

use rendezvous_foundation::{EntityKind, RecordId};
use rendezvous_storage::{Event, Location, Participant, User};
use serde::Serialize;

/// A record of any kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    /// A user.
    User(User),
    /// A location.
    Location(Location),
    /// An event.
    Event(Event),
    /// A participant.
    Participant(Participant),
}

impl Entity {
    /// The record's kind.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Location(_) => EntityKind::Location,
            Self::Event(_) => EntityKind::Event,
            Self::Participant(_) => EntityKind::Participant,
        }
    }

    /// The record's id.
    #[must_use]
    pub fn id(&self) -> RecordId {
        match self {
            Self::User(user) => user.id,
            Self::Location(location) => location.id,
            Self::Event(event) => event.id,
            Self::Participant(participant) => participant.id,
        }
    }
}

impl From<User> for Entity {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl From<Location> for Entity {
    fn from(location: Location) -> Self {
        Self::Location(location)
    }
}

impl From<Event> for Entity {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

impl From<Participant> for Entity {
    fn from(participant: Participant) -> Self {
        Self::Participant(participant)
    }
}

/// The result of running an [`Operation`](crate::Operation).
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    /// The record created, updated, or deleted.
    Record(Entity),
    /// The result of a `get`: the record, or nothing.
    Found(Option<Entity>),
    /// The result of a `list`, in stored order.
    List(EntityKind, Vec<Entity>),
    /// Number of records removed by a `deleteAll`.
    Count(usize),
}

impl Response {
    /// Returns the records carried by this response.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        match self {
            Self::Record(entity) | Self::Found(Some(entity)) => std::slice::from_ref(entity),
            Self::List(_, entities) => entities,
            Self::Found(None) | Self::Count(_) => &[],
        }
    }
}
