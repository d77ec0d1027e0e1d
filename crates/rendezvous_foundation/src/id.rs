//! Record identifiers.
//!
//! Identifiers reach the store from two directions: numbers from seed data
//! and strings from request arguments. Both normalize to the same
//! [`RecordId`], so `"7"` and `7` name the same record.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Identifier of a record within its collection.
///
/// Identifiers are unique per collection, never per store: a User and an
/// Event may both carry id 1.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RecordId(u64);

impl RecordId {
    /// Creates an identifier from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parses an identifier from its textual form.
    ///
    /// Surrounding whitespace is ignored and a leading `+` is accepted, so
    /// `" 7"`, `"+7"` and `"7"` all denote the same record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::InvalidId`] if the text is not a
    /// non-negative integer.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_id(text));
        }
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| Error::invalid_id(text))
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<RecordId> for u64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::RecordId;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for RecordId {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_u64(self.0)
        }
    }

    impl<'de> Deserialize<'de> for RecordId {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct RecordIdVisitor;

            impl Visitor<'_> for RecordIdVisitor {
                type Value = RecordId;

                fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                    formatter.write_str("a non-negative integer or a numeric string")
                }

                fn visit_u64<E>(self, value: u64) -> std::result::Result<RecordId, E>
                where
                    E: de::Error,
                {
                    Ok(RecordId(value))
                }

                fn visit_i64<E>(self, value: i64) -> std::result::Result<RecordId, E>
                where
                    E: de::Error,
                {
                    u64::try_from(value)
                        .map(RecordId)
                        .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
                }

                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::float_cmp
                )]
                fn visit_f64<E>(self, value: f64) -> std::result::Result<RecordId, E>
                where
                    E: de::Error,
                {
                    // JSON clients sometimes send 3.0 for 3
                    if value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64 {
                        Ok(RecordId(value as u64))
                    } else {
                        Err(E::invalid_value(de::Unexpected::Float(value), &self))
                    }
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<RecordId, E>
                where
                    E: de::Error,
                {
                    RecordId::parse(value)
                        .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }

            deserializer.deserialize_any(RecordIdVisitor)
        }
    }
}
