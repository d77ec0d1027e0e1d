//! Relationship field selection.
//!
//! A read resolves only the relationship fields it asks for. A dangling
//! reference is an error only when its field is part of the selection, so
//! `Event.participants` stays readable after the event's owner is deleted.

use std::fmt;

use rendezvous_foundation::EntityKind;
use rendezvous_storage::relationship;
use rendezvous_storage::schema::RelationshipSchema;

/// Which relationship fields a rendered record carries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Fields {
    /// Records render plain.
    #[default]
    None,
    /// Every relationship field of every record.
    All,
    /// Only the listed fields.
    Only(Vec<RelationshipSchema>),
}

impl Fields {
    /// Selects the fields with the given qualified names (`Event.user`).
    ///
    /// # Errors
    ///
    /// Returns the first name that is not a relationship field.
    pub fn qualified<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, String> {
        let mut selected = Vec::new();
        for name in names {
            let schema =
                relationship::schema_by_qualified_name(name).ok_or_else(|| name.to_string())?;
            if !selected.contains(&schema) {
                selected.push(schema);
            }
        }
        Ok(Self::from_schemas(selected))
    }

    /// Selects the named fields of records of `kind` (`user`, `participants`).
    ///
    /// # Errors
    ///
    /// Returns the first name that is not a relationship field of `kind`.
    pub fn of_kind<'a>(
        kind: EntityKind,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, String> {
        let mut selected = Vec::new();
        for name in names {
            let schema = relationship::schema(kind, name).ok_or_else(|| name.to_string())?;
            if !selected.contains(&schema) {
                selected.push(schema);
            }
        }
        Ok(Self::from_schemas(selected))
    }

    fn from_schemas(selected: Vec<RelationshipSchema>) -> Self {
        if selected.is_empty() {
            Self::None
        } else {
            Self::Only(selected)
        }
    }

    /// Returns true if `schema` should be resolved.
    #[must_use]
    pub fn includes(&self, schema: &RelationshipSchema) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::Only(selected) => selected.contains(schema),
        }
    }

    /// Returns true if no field is selected.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<bool> for Fields {
    fn from(expand: bool) -> Self {
        if expand { Self::All } else { Self::None }
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("off"),
            Self::All => f.write_str("on"),
            Self::Only(selected) => {
                let names: Vec<_> = selected
                    .iter()
                    .map(RelationshipSchema::qualified_name)
                    .collect();
                f.write_str(&names.join(", "))
            }
        }
    }
}
