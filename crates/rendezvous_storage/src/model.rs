//! Record types for users, locations, events, and participants.
//!
//! Each kind comes in three shapes: the stored record, the creation input
//! (`New*`, no id) and the patch (`*Patch`, every field optional).

use rendezvous_foundation::{EntityKind, RecordId};
use serde::{Deserialize, Serialize};

use crate::record::{Record, merge};

/// A registered user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier within the user collection.
    pub id: RecordId,
    /// Display name.
    pub username: String,
    /// Contact address.
    pub email: String,
}

/// Input for creating a [`User`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    /// Display name.
    pub username: String,
    /// Contact address.
    pub email: String,
}

/// Partial update for a [`User`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserPatch {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New contact address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Record for User {
    const KIND: EntityKind = EntityKind::User;
    type Input = NewUser;
    type Patch = UserPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_input(id: RecordId, input: NewUser) -> Self {
        Self {
            id,
            username: input.username,
            email: input.email,
        }
    }

    fn apply(&mut self, patch: UserPatch) {
        merge(&mut self.username, patch.username);
        merge(&mut self.email, patch.email);
    }
}

/// A place where events are held.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Identifier within the location collection.
    pub id: RecordId,
    /// Place name.
    pub name: String,
    /// Free-form description.
    pub desc: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Input for creating a [`Location`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewLocation {
    /// Place name.
    pub name: String,
    /// Free-form description.
    pub desc: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Partial update for a [`Location`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationPatch {
    /// New place name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// New latitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// New longitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Record for Location {
    const KIND: EntityKind = EntityKind::Location;
    type Input = NewLocation;
    type Patch = LocationPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_input(id: RecordId, input: NewLocation) -> Self {
        Self {
            id,
            name: input.name,
            desc: input.desc,
            lat: input.lat,
            lng: input.lng,
        }
    }

    fn apply(&mut self, patch: LocationPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.desc, patch.desc);
        merge(&mut self.lat, patch.lat);
        merge(&mut self.lng, patch.lng);
    }
}

/// A scheduled event, owned by a user and held at a location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Identifier within the event collection.
    pub id: RecordId,
    /// Headline.
    pub title: String,
    /// Free-form description.
    pub desc: String,
    /// Calendar date, kept as given.
    pub date: String,
    /// Start time, kept as given.
    pub from: String,
    /// End time, kept as given.
    pub to: String,
    /// The hosting location. Not checked on write.
    pub location_id: RecordId,
    /// The owning user. Not checked on write.
    pub user_id: RecordId,
}

/// Input for creating an [`Event`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewEvent {
    /// Headline.
    pub title: String,
    /// Free-form description.
    pub desc: String,
    /// Calendar date.
    pub date: String,
    /// Start time.
    pub from: String,
    /// End time.
    pub to: String,
    /// The hosting location.
    pub location_id: RecordId,
    /// The owning user.
    pub user_id: RecordId,
}

/// Partial update for an [`Event`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventPatch {
    /// New headline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// New date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// New start time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// New end time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// New hosting location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<RecordId>,
    /// New owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
}

impl Record for Event {
    const KIND: EntityKind = EntityKind::Event;
    type Input = NewEvent;
    type Patch = EventPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_input(id: RecordId, input: NewEvent) -> Self {
        Self {
            id,
            title: input.title,
            desc: input.desc,
            date: input.date,
            from: input.from,
            to: input.to,
            location_id: input.location_id,
            user_id: input.user_id,
        }
    }

    fn apply(&mut self, patch: EventPatch) {
        merge(&mut self.title, patch.title);
        merge(&mut self.desc, patch.desc);
        merge(&mut self.date, patch.date);
        merge(&mut self.from, patch.from);
        merge(&mut self.to, patch.to);
        merge(&mut self.location_id, patch.location_id);
        merge(&mut self.user_id, patch.user_id);
    }
}

/// A user's attendance at an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Identifier within the participant collection.
    pub id: RecordId,
    /// The attending user. Not checked on write.
    pub user_id: RecordId,
    /// The attended event. Not checked on write.
    pub event_id: RecordId,
}

/// Input for creating a [`Participant`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewParticipant {
    /// The attending user.
    pub user_id: RecordId,
    /// The attended event.
    pub event_id: RecordId,
}

/// Partial update for a [`Participant`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticipantPatch {
    /// New attending user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    /// New attended event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<RecordId>,
}

impl Record for Participant {
    const KIND: EntityKind = EntityKind::Participant;
    type Input = NewParticipant;
    type Patch = ParticipantPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_input(id: RecordId, input: NewParticipant) -> Self {
        Self {
            id,
            user_id: input.user_id,
            event_id: input.event_id,
        }
    }

    fn apply(&mut self, patch: ParticipantPatch) {
        merge(&mut self.user_id, patch.user_id);
        merge(&mut self.event_id, patch.event_id);
    }
}
