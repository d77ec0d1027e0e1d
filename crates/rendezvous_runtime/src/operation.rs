//! The named operation surface.
//!
//! Every operation is addressed by a name built from a verb and an entity
//! kind, and takes a JSON object of arguments:
//!
//! | Name | Arguments |
//! |------|-----------|
//! | `get<Kind>` | `{"id": ..}` |
//! | `list<Kinds>` | none |
//! | `create<Kind>` | `{"data": {..}}` |
//! | `update<Kind>` | `{"id": .., "data": {..}}` |
//! | `delete<Kind>` | `{"id": ..}` |
//! | `deleteAll<Kinds>` | none |
//!
//! Ids may be given as numbers or numeric strings.
//!
//! Every operation except `deleteAll<Kinds>` also takes an optional
//! `"fields": [..]` argument naming the relationship fields to resolve on
//! its result, e.g. `getEvent {"id": 1, "fields": ["participants"]}`.

use rendezvous_foundation::{EntityKind, Error, ErrorKind, RecordId, Result};
use rendezvous_storage::{
    EventPatch, LocationPatch, NewEvent, NewLocation, NewParticipant, NewUser, ParticipantPatch,
    UserPatch,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::fields::Fields;

/// Creation input for one of the four kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    /// Input for `createUser`.
    User(NewUser),
    /// Input for `createLocation`.
    Location(NewLocation),
    /// Input for `createEvent`.
    Event(NewEvent),
    /// Input for `createParticipant`.
    Participant(NewParticipant),
}

impl Input {
    /// The kind this input creates.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Location(_) => EntityKind::Location,
            Self::Event(_) => EntityKind::Event,
            Self::Participant(_) => EntityKind::Participant,
        }
    }

    fn decode(operation: &str, kind: EntityKind, data: &Value) -> Result<Self> {
        Ok(match kind {
            EntityKind::User => Self::User(decode_data(operation, data)?),
            EntityKind::Location => Self::Location(decode_data(operation, data)?),
            EntityKind::Event => Self::Event(decode_data(operation, data)?),
            EntityKind::Participant => Self::Participant(decode_data(operation, data)?),
        })
    }
}

/// Update patch for one of the four kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Patch {
    /// Patch for `updateUser`.
    User(UserPatch),
    /// Patch for `updateLocation`.
    Location(LocationPatch),
    /// Patch for `updateEvent`.
    Event(EventPatch),
    /// Patch for `updateParticipant`.
    Participant(ParticipantPatch),
}

impl Patch {
    /// The kind this patch applies to.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Location(_) => EntityKind::Location,
            Self::Event(_) => EntityKind::Event,
            Self::Participant(_) => EntityKind::Participant,
        }
    }

    fn decode(operation: &str, kind: EntityKind, data: &Value) -> Result<Self> {
        Ok(match kind {
            EntityKind::User => Self::User(decode_data(operation, data)?),
            EntityKind::Location => Self::Location(decode_data(operation, data)?),
            EntityKind::Event => Self::Event(decode_data(operation, data)?),
            EntityKind::Participant => Self::Participant(decode_data(operation, data)?),
        })
    }
}

/// A parsed operation, ready to run against a store.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// `get<Kind>(id)`: one record or nothing.
    Get {
        /// Collection to search.
        kind: EntityKind,
        /// Requested id.
        id: RecordId,
    },
    /// `list<Kinds>()`: the whole collection in stored order.
    List(EntityKind),
    /// `create<Kind>(data)`.
    Create(Input),
    /// `update<Kind>(id, data)`.
    Update {
        /// Record to update.
        id: RecordId,
        /// Fields to overwrite.
        patch: Patch,
    },
    /// `delete<Kind>(id)`.
    Delete {
        /// Collection to delete from.
        kind: EntityKind,
        /// Record to delete.
        id: RecordId,
    },
    /// `deleteAll<Kinds>()`: empties the collection.
    DeleteAll(EntityKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verb {
    Get,
    List,
    Create,
    Update,
    Delete,
    DeleteAll,
}

impl Verb {
    // Longer prefixes first: `deleteAll` must win over `delete`.
    const PREFIXES: [(&'static str, Verb); 6] = [
        ("deleteAll", Verb::DeleteAll),
        ("delete", Verb::Delete),
        ("get", Verb::Get),
        ("list", Verb::List),
        ("create", Verb::Create),
        ("update", Verb::Update),
    ];

    fn takes_plural(self) -> bool {
        matches!(self, Self::List | Self::DeleteAll)
    }

    fn allowed_args(self) -> &'static [&'static str] {
        match self {
            Self::Get | Self::Delete => &["id"],
            Self::Update => &["id", "data"],
            Self::Create => &["data"],
            Self::List | Self::DeleteAll => &[],
        }
    }
}

fn split_name(name: &str) -> Option<(Verb, EntityKind)> {
    Verb::PREFIXES.iter().find_map(|&(prefix, verb)| {
        let rest = name.strip_prefix(prefix)?;
        let kind = if verb.takes_plural() {
            EntityKind::from_plural(rest)
        } else {
            EntityKind::from_name(rest)
        }?;
        Some((verb, kind))
    })
}

impl Operation {
    /// Parses an operation from its name and JSON arguments.
    ///
    /// `args` must be an object, or `null` for operations without arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownOperation`] if `name` is not an operation,
    /// [`ErrorKind::InvalidId`] if an id is not a non-negative integer, and
    /// [`ErrorKind::InvalidArguments`] for any other argument problem.
    pub fn parse(name: &str, args: &Value) -> Result<Self> {
        let (verb, kind) = split_name(name)
            .ok_or_else(|| Error::new(ErrorKind::UnknownOperation(name.to_string())))?;

        let empty = Map::new();
        let args = match args {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(Error::invalid_arguments(
                    name,
                    format!("expected an object, got {}", json_type(other)),
                ));
            }
        };

        let allowed = verb.allowed_args();
        if let Some(extra) = args.keys().find(|key| !allowed.contains(&key.as_str())) {
            return Err(Error::invalid_arguments(
                name,
                format!("unexpected argument `{extra}`"),
            ));
        }

        Ok(match verb {
            Verb::Get => Self::Get {
                kind,
                id: id_arg(name, args)?,
            },
            Verb::List => Self::List(kind),
            Verb::Create => Self::Create(Input::decode(name, kind, data_arg(name, args)?)?),
            Verb::Update => Self::Update {
                id: id_arg(name, args)?,
                patch: Patch::decode(name, kind, data_arg(name, args)?)?,
            },
            Verb::Delete => Self::Delete {
                kind,
                id: id_arg(name, args)?,
            },
            Verb::DeleteAll => Self::DeleteAll(kind),
        })
    }

    /// The kind this operation addresses.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Get { kind, .. }
            | Self::Delete { kind, .. }
            | Self::List(kind)
            | Self::DeleteAll(kind) => *kind,
            Self::Create(input) => input.kind(),
            Self::Update { patch, .. } => patch.kind(),
        }
    }

    /// The operation's name, e.g. `getUser` or `deleteAllParticipants`.
    #[must_use]
    pub fn name(&self) -> String {
        let kind = self.kind();
        match self {
            Self::Get { .. } => format!("get{}", kind.name()),
            Self::List(_) => format!("list{}", kind.plural()),
            Self::Create(_) => format!("create{}", kind.name()),
            Self::Update { .. } => format!("update{}", kind.name()),
            Self::Delete { .. } => format!("delete{}", kind.name()),
            Self::DeleteAll(_) => format!("deleteAll{}", kind.plural()),
        }
    }

    /// Returns true if running this operation changes the store.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Get { .. } | Self::List(_))
    }

    /// Every operation name, grouped by kind.
    #[must_use]
    pub fn names() -> Vec<String> {
        EntityKind::ALL
            .iter()
            .flat_map(|kind| {
                [
                    format!("get{}", kind.name()),
                    format!("list{}", kind.plural()),
                    format!("create{}", kind.name()),
                    format!("update{}", kind.name()),
                    format!("delete{}", kind.name()),
                    format!("deleteAll{}", kind.plural()),
                ]
            })
            .collect()
    }
}

/// An operation plus the relationship fields its result should carry.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    /// The operation to run.
    pub operation: Operation,
    /// Fields named by the `fields` argument. `None` defers to the session.
    pub fields: Option<Fields>,
}

impl Request {
    /// Parses an operation and its optional `fields` argument.
    ///
    /// # Errors
    ///
    /// Returns every error [`Operation::parse`] does, and
    /// [`ErrorKind::InvalidArguments`] if `fields` is not a list of
    /// relationship fields of the operation's kind.
    pub fn parse(name: &str, args: &Value) -> Result<Self> {
        let Some(fields) = args.get("fields") else {
            return Ok(Self {
                operation: Operation::parse(name, args)?,
                fields: None,
            });
        };

        let mut rest = args.clone();
        if let Some(map) = rest.as_object_mut() {
            map.remove("fields");
        }
        let operation = Operation::parse(name, &rest)?;
        if let Operation::DeleteAll(_) = operation {
            return Err(Error::invalid_arguments(name, "unexpected argument `fields`"));
        }

        let fields = fields_arg(name, operation.kind(), fields)?;
        Ok(Self {
            operation,
            fields: Some(fields),
        })
    }
}

fn fields_arg(operation: &str, kind: EntityKind, value: &Value) -> Result<Fields> {
    let Value::Array(items) = value else {
        return Err(Error::invalid_arguments(
            operation,
            format!("`fields` must be an array, got {}", json_type(value)),
        ));
    };
    let names = items
        .iter()
        .map(|item| {
            item.as_str().ok_or_else(|| {
                Error::invalid_arguments(operation, "`fields` must list field names")
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Fields::of_kind(kind, names).map_err(|field| {
        Error::invalid_arguments(
            operation,
            format!("{kind} has no relationship field `{field}`"),
        )
    })
}

fn id_arg(operation: &str, args: &Map<String, Value>) -> Result<RecordId> {
    match args.get("id") {
        Some(Value::String(text)) => RecordId::parse(text),
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| integral_f64(number.as_f64()?))
            .map(RecordId::new)
            .ok_or_else(|| Error::invalid_id(number.to_string())),
        Some(other) => Err(Error::invalid_arguments(
            operation,
            format!("`id` must be a number or string, got {}", json_type(other)),
        )),
        None => Err(Error::invalid_arguments(operation, "missing argument `id`")),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn integral_f64(value: f64) -> Option<u64> {
    (value.fract() == 0.0 && value >= 0.0 && value < u64::MAX as f64).then_some(value as u64)
}

fn data_arg<'a>(operation: &str, args: &'a Map<String, Value>) -> Result<&'a Value> {
    args.get("data")
        .ok_or_else(|| Error::invalid_arguments(operation, "missing argument `data`"))
}

fn decode_data<T: DeserializeOwned>(operation: &str, data: &Value) -> Result<T> {
    T::deserialize(data).map_err(|e| Error::invalid_arguments(operation, e.to_string()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
