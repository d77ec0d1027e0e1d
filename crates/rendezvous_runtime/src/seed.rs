//! Seed data loading.
//!
//! The store starts from a JSON document holding the four collections:
//!
//! ```json
//! { "users": [...], "locations": [...], "events": [...], "participants": [...] }
//! ```
//!
//! Missing arrays are treated as empty. Records keep the ids they carry.

use std::fs;
use std::path::Path;

use rendezvous_foundation::{EntityKind, Error, ErrorKind, Result};
use rendezvous_storage::{Collection, Event, Location, Participant, Store, User};
use serde::{Deserialize, Serialize};

/// The initial dataset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seed {
    /// Seeded users.
    pub users: Vec<User>,
    /// Seeded locations.
    pub locations: Vec<Location>,
    /// Seeded events.
    pub events: Vec<Event>,
    /// Seeded participants.
    pub participants: Vec<Participant>,
}

impl Seed {
    /// Decodes a seed from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Seed`] if the text is not a valid seed document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::new(ErrorKind::Seed(e.to_string())))
    }

    /// Loads a seed from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Io`] if the file cannot be read, or
    /// [`ErrorKind::Seed`] if it is not a valid seed document.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to read seed '{}': {e}",
                path.display()
            )))
        })?;
        let seed = Self::from_json(&text)?;
        tracing::info!(
            path = %path.display(),
            users = seed.users.len(),
            locations = seed.locations.len(),
            events = seed.events.len(),
            participants = seed.participants.len(),
            "loaded seed"
        );
        Ok(seed)
    }

    /// Encodes the seed as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
    }

    /// Number of records held for `kind`.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::User => self.users.len(),
            EntityKind::Location => self.locations.len(),
            EntityKind::Event => self.events.len(),
            EntityKind::Participant => self.participants.len(),
        }
    }

    /// Builds a store holding exactly these records.
    ///
    /// Foreign keys are taken as they are; only id uniqueness is checked.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DuplicateId`] if a collection repeats an id.
    pub fn into_store(self) -> Result<Store> {
        Ok(Store::from_collections(
            Collection::from_records(self.users)?,
            Collection::from_records(self.locations)?,
            Collection::from_records(self.events)?,
            Collection::from_records(self.participants)?,
        ))
    }

    /// Captures the current contents of a store.
    #[must_use]
    pub fn from_store(store: &Store) -> Self {
        Self {
            users: store.users().iter().cloned().collect(),
            locations: store.locations().iter().cloned().collect(),
            events: store.events().iter().cloned().collect(),
            participants: store.participants().iter().cloned().collect(),
        }
    }
}
