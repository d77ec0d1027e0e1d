//! Expanded read shapes.
//!
//! A view is a record plus the relationship fields a read selected, resolved
//! against the store at the moment it is built. Fields outside the selection
//! are neither resolved nor rendered. Expansion is one level deep: the
//! records inside a view are rendered plain.

use rendezvous_foundation::{Error, ErrorKind, Result};
use rendezvous_storage::relationship::{
    BelongsTo, EVENT_LOCATION, EVENT_PARTICIPANTS, EVENT_USER, HasMany, LOCATION_EVENTS,
    PARTICIPANT_EVENT, PARTICIPANT_USER, USER_EVENTS,
};
use rendezvous_storage::{Event, Location, Participant, Record, Store, Table, User};
use serde::Serialize;
use serde_json::Value;

use crate::fields::Fields;
use crate::response::Entity;

/// A user with the events they own.
#[derive(Debug, Serialize)]
pub struct UserView<'a> {
    /// The stored record.
    #[serde(flatten)]
    pub user: &'a User,
    /// `User.events`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<&'a Event>>,
}

impl<'a> UserView<'a> {
    /// Resolves the selected fields of `user`.
    #[must_use]
    pub fn resolve(store: &'a Store, user: &'a User, fields: &Fields) -> Self {
        Self {
            user,
            events: many(store, &USER_EVENTS, user, fields),
        }
    }
}

/// A location with the events held there.
#[derive(Debug, Serialize)]
pub struct LocationView<'a> {
    /// The stored record.
    #[serde(flatten)]
    pub location: &'a Location,
    /// `Location.events`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<&'a Event>>,
}

impl<'a> LocationView<'a> {
    /// Resolves the selected fields of `location`.
    #[must_use]
    pub fn resolve(store: &'a Store, location: &'a Location, fields: &Fields) -> Self {
        Self {
            location,
            events: many(store, &LOCATION_EVENTS, location, fields),
        }
    }
}

/// An event with its owner, location, and participants.
#[derive(Debug, Serialize)]
pub struct EventView<'a> {
    /// The stored record.
    #[serde(flatten)]
    pub event: &'a Event,
    /// `Event.user`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<&'a User>,
    /// `Event.location`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a Location>,
    /// `Event.participants`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<&'a Participant>>,
}

impl<'a> EventView<'a> {
    /// Resolves the selected fields of `event`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DanglingReference`] if the owner or location is
    /// selected and does not exist.
    pub fn resolve(store: &'a Store, event: &'a Event, fields: &Fields) -> Result<Self> {
        Ok(Self {
            event,
            user: one(store, &EVENT_USER, event, fields)?,
            location: one(store, &EVENT_LOCATION, event, fields)?,
            participants: many(store, &EVENT_PARTICIPANTS, event, fields),
        })
    }
}

/// A participant with the user and event it links.
#[derive(Debug, Serialize)]
pub struct ParticipantView<'a> {
    /// The stored record.
    #[serde(flatten)]
    pub participant: &'a Participant,
    /// `Participant.user`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<&'a User>,
    /// `Participant.event`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<&'a Event>,
}

impl<'a> ParticipantView<'a> {
    /// Resolves the selected fields of `participant`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DanglingReference`] if the user or event is
    /// selected and does not exist.
    pub fn resolve(
        store: &'a Store,
        participant: &'a Participant,
        fields: &Fields,
    ) -> Result<Self> {
        Ok(Self {
            participant,
            user: one(store, &PARTICIPANT_USER, participant, fields)?,
            event: one(store, &PARTICIPANT_EVENT, participant, fields)?,
        })
    }
}

fn one<'a, S: Record, T: Table>(
    store: &'a Store,
    relation: &BelongsTo<S, T>,
    source: &S,
    fields: &Fields,
) -> Result<Option<&'a T>> {
    if fields.includes(&relation.schema) {
        store.require(relation, source).map(Some)
    } else {
        Ok(None)
    }
}

fn many<'a, S: Record, T: Table>(
    store: &'a Store,
    relation: &HasMany<S, T>,
    source: &S,
    fields: &Fields,
) -> Option<Vec<&'a T>> {
    fields
        .includes(&relation.schema)
        .then(|| store.related(relation, source))
}

/// Renders a record plain.
///
/// # Errors
///
/// Returns [`ErrorKind::Serialization`] if encoding fails.
pub fn plain(entity: &Entity) -> Result<Value> {
    to_json(entity)
}

/// Renders a record with its selected relationship fields resolved.
///
/// # Errors
///
/// Returns [`ErrorKind::DanglingReference`] if a selected mandatory
/// relationship of the record points at a missing record.
pub fn expanded(store: &Store, entity: &Entity, fields: &Fields) -> Result<Value> {
    match entity {
        Entity::User(user) => to_json(&UserView::resolve(store, user, fields)),
        Entity::Location(location) => to_json(&LocationView::resolve(store, location, fields)),
        Entity::Event(event) => to_json(&EventView::resolve(store, event, fields)?),
        Entity::Participant(participant) => {
            to_json(&ParticipantView::resolve(store, participant, fields)?)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}
