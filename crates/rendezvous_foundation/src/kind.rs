//! Entity kinds.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of record a collection holds.
///
/// Used to tag errors and to name operations (`getUser`, `deleteAllEvents`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntityKind {
    /// A registered user.
    User,
    /// A place where events are held.
    Location,
    /// A scheduled event.
    Event,
    /// A user's attendance at an event.
    Participant,
}

impl EntityKind {
    /// All kinds, in the order the store lays out its collections.
    pub const ALL: [Self; 4] = [Self::User, Self::Location, Self::Event, Self::Participant];

    /// Singular name, as used in operation names (`createUser`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Location => "Location",
            Self::Event => "Event",
            Self::Participant => "Participant",
        }
    }

    /// Plural name, as used in list and delete-all operations (`listUsers`).
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::User => "Users",
            Self::Location => "Locations",
            Self::Event => "Events",
            Self::Participant => "Participants",
        }
    }

    /// Looks a kind up by its singular name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Looks a kind up by its plural name.
    #[must_use]
    pub fn from_plural(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.plural() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
