//! Schema definitions for relationships.
//!
//! Schemas describe a relationship field: where it starts, where it points,
//! which stored column carries the key, and whether a missing target is an
//! error.

use std::fmt;

use rendezvous_foundation::EntityKind;

/// Direction of a relationship relative to its foreign key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// The source holds the foreign key and points at a single target.
    ManyToOne,
    /// Each target holds a foreign key pointing back at the source.
    OneToMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManyToOne => f.write_str("many-to-one"),
            Self::OneToMany => f.write_str("one-to-many"),
        }
    }
}

/// Schema definition for a relationship field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RelationshipSchema {
    /// Field name on the source shape (e.g. `user`, `participants`).
    pub name: &'static str,
    /// Kind of the record the field is read from.
    pub source: EntityKind,
    /// Kind of the related records.
    pub target: EntityKind,
    /// Which side holds the key.
    pub cardinality: Cardinality,
    /// Stored column holding the key. Lives on the source for
    /// [`Cardinality::ManyToOne`] and on the target for
    /// [`Cardinality::OneToMany`].
    pub foreign_key: &'static str,
    /// Whether a missing target is an error. Only meaningful for
    /// [`Cardinality::ManyToOne`]; one-to-many fields resolve to an empty list.
    pub required: bool,
}

impl RelationshipSchema {
    /// Schema for a mandatory many-to-one field.
    #[must_use]
    pub const fn many_to_one(
        name: &'static str,
        source: EntityKind,
        target: EntityKind,
        foreign_key: &'static str,
    ) -> Self {
        Self {
            name,
            source,
            target,
            cardinality: Cardinality::ManyToOne,
            foreign_key,
            required: true,
        }
    }

    /// Schema for a one-to-many field.
    #[must_use]
    pub const fn one_to_many(
        name: &'static str,
        source: EntityKind,
        target: EntityKind,
        foreign_key: &'static str,
    ) -> Self {
        Self {
            name,
            source,
            target,
            cardinality: Cardinality::OneToMany,
            foreign_key,
            required: false,
        }
    }

    /// Qualified field name, e.g. `Event.user`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.source, self.name)
    }
}

impl fmt::Display for RelationshipSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.cardinality {
            Cardinality::ManyToOne if self.required => format!("{}!", self.target),
            Cardinality::ManyToOne => self.target.to_string(),
            Cardinality::OneToMany => format!("[{}]", self.target),
        };
        write!(
            f,
            "{}.{}: {target} ({}, via {})",
            self.source, self.name, self.cardinality, self.foreign_key
        )
    }
}
