//! Session state for running operations.
//!
//! A [`Session`] owns the [`Store`]. Every operation that changes the store
//! goes through `&mut self`, so there is exactly one writer at a time; callers
//! that share a session across threads wrap the whole session in one mutex.

use rendezvous_foundation::{EntityKind, RecordId, Result};
use rendezvous_storage::{Event, Location, Participant, Store, Table, User};
use serde_json::{Value, json};

use crate::config::Config;
use crate::fields::Fields;
use crate::operation::{Input, Operation, Patch, Request};
use crate::response::{Entity, Response};
use crate::seed::Seed;
use crate::view;

/// A store plus the settings that shape how results are rendered.
#[derive(Clone, Debug, Default)]
pub struct Session {
    store: Store,
    config: Config,
}

impl Session {
    /// Creates a session over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session over an existing store.
    #[must_use]
    pub fn with_store(store: Store) -> Self {
        Self {
            store,
            config: Config::default(),
        }
    }

    /// Creates a session from configuration, loading the seed file if one is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed file cannot be read or decoded, or if it
    /// repeats an id within a collection.
    pub fn from_config(config: Config) -> Result<Self> {
        let store = match &config.seed_path {
            Some(path) => Seed::load_from_file(path)?.into_store()?,
            None => Store::new(),
        };
        Ok(Self { store, config })
    }

    /// Returns the store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns true if rendered records include any relationship field.
    #[must_use]
    pub fn expand_relations(&self) -> bool {
        !self.config.expand.is_none()
    }

    /// Turns expansion of every relationship field on or off.
    pub fn set_expand_relations(&mut self, expand: bool) {
        self.config.expand = Fields::from(expand);
    }

    /// Returns the relationship fields rendered records carry.
    #[must_use]
    pub fn expand_fields(&self) -> &Fields {
        &self.config.expand
    }

    /// Expands only the given relationship fields.
    pub fn set_expand_fields(&mut self, fields: Fields) {
        self.config.expand = fields;
    }

    /// Runs an operation against the store.
    ///
    /// Either the operation fully succeeds or the store is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`rendezvous_foundation::ErrorKind::NotFound`] if an update or
    /// delete targets a missing record.
    pub fn execute(&mut self, operation: &Operation) -> Result<Response> {
        Ok(match operation {
            Operation::Get { kind, id } => Response::Found(self.find(*kind, *id)),
            Operation::List(kind) => Response::List(*kind, self.list(*kind)),
            Operation::Create(input) => Response::Record(self.create(input.clone())?),
            Operation::Update { id, patch } => Response::Record(self.update(*id, patch.clone())?),
            Operation::Delete { kind, id } => Response::Record(self.delete(*kind, *id)?),
            Operation::DeleteAll(kind) => Response::Count(self.delete_all(*kind)),
        })
    }

    /// Renders a response as JSON with the session's expanded fields.
    ///
    /// # Errors
    ///
    /// Returns [`rendezvous_foundation::ErrorKind::DanglingReference`] if an
    /// expanded mandatory relationship points at a missing record.
    pub fn render(&self, response: &Response) -> Result<Value> {
        self.render_with(response, &self.config.expand)
    }

    /// Renders a response as JSON, resolving only `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`rendezvous_foundation::ErrorKind::DanglingReference`] if a
    /// selected mandatory relationship points at a missing record.
    pub fn render_with(&self, response: &Response, fields: &Fields) -> Result<Value> {
        match response {
            Response::Record(entity) | Response::Found(Some(entity)) => {
                self.render_entity(entity, fields)
            }
            Response::Found(None) => Ok(Value::Null),
            Response::List(_, entities) => entities
                .iter()
                .map(|entity| self.render_entity(entity, fields))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Response::Count(count) => Ok(json!({ "count": count })),
        }
    }

    /// Parses, executes, and renders an operation by name.
    ///
    /// A `fields` argument overrides the session's expanded fields for this
    /// call.
    ///
    /// # Errors
    ///
    /// Returns any parse, execution, or rendering error, tagged with the
    /// operation name.
    pub fn run(&mut self, name: &str, args: &Value) -> Result<Value> {
        let request = Request::parse(name, args).map_err(|e| e.in_operation(name))?;
        let response = self
            .execute(&request.operation)
            .map_err(|e| e.in_operation(name))?;
        let fields = request.fields.as_ref().unwrap_or(&self.config.expand);
        self.render_with(&response, fields)
            .map_err(|e| e.in_operation(name))
    }

    fn render_entity(&self, entity: &Entity, fields: &Fields) -> Result<Value> {
        if fields.is_none() {
            view::plain(entity)
        } else {
            view::expanded(&self.store, entity, fields)
        }
    }

    fn find(&self, kind: EntityKind, id: RecordId) -> Option<Entity> {
        fn find_in<R: Table + Into<Entity>>(store: &Store, id: RecordId) -> Option<Entity> {
            store.find::<R>(id).cloned().map(Into::into)
        }

        match kind {
            EntityKind::User => find_in::<User>(&self.store, id),
            EntityKind::Location => find_in::<Location>(&self.store, id),
            EntityKind::Event => find_in::<Event>(&self.store, id),
            EntityKind::Participant => find_in::<Participant>(&self.store, id),
        }
    }

    fn list(&self, kind: EntityKind) -> Vec<Entity> {
        fn list_in<R: Table + Into<Entity>>(store: &Store) -> Vec<Entity> {
            store.list::<R>().into_iter().map(Into::into).collect()
        }

        match kind {
            EntityKind::User => list_in::<User>(&self.store),
            EntityKind::Location => list_in::<Location>(&self.store),
            EntityKind::Event => list_in::<Event>(&self.store),
            EntityKind::Participant => list_in::<Participant>(&self.store),
        }
    }

    fn create(&mut self, input: Input) -> Result<Entity> {
        Ok(match input {
            Input::User(input) => self.store.create::<User>(input)?.into(),
            Input::Location(input) => self.store.create::<Location>(input)?.into(),
            Input::Event(input) => self.store.create::<Event>(input)?.into(),
            Input::Participant(input) => self.store.create::<Participant>(input)?.into(),
        })
    }

    fn update(&mut self, id: RecordId, patch: Patch) -> Result<Entity> {
        Ok(match patch {
            Patch::User(patch) => self.store.update::<User>(id, patch)?.into(),
            Patch::Location(patch) => self.store.update::<Location>(id, patch)?.into(),
            Patch::Event(patch) => self.store.update::<Event>(id, patch)?.into(),
            Patch::Participant(patch) => self.store.update::<Participant>(id, patch)?.into(),
        })
    }

    fn delete(&mut self, kind: EntityKind, id: RecordId) -> Result<Entity> {
        Ok(match kind {
            EntityKind::User => self.store.delete::<User>(id)?.into(),
            EntityKind::Location => self.store.delete::<Location>(id)?.into(),
            EntityKind::Event => self.store.delete::<Event>(id)?.into(),
            EntityKind::Participant => self.store.delete::<Participant>(id)?.into(),
        })
    }

    fn delete_all(&mut self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::User => self.store.delete_all::<User>(),
            EntityKind::Location => self.store.delete_all::<Location>(),
            EntityKind::Event => self.store.delete_all::<Event>(),
            EntityKind::Participant => self.store.delete_all::<Participant>(),
        }
    }
}
