//! Opaque entity identifiers.
//!
//! Seeded rows keep their original short identifiers (`shop1`, `admin1`), so
//! identifiers are validated strings rather than parsed UUIDs; freshly created
//! rows receive UUID-backed values from the `random` constructors.

use std::fmt;

/// Validation errors raised by identifier constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdValidationError {
    /// Identifier was empty.
    Empty,
    /// Identifier carried surrounding whitespace.
    Untrimmed,
}

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::Untrimmed => write!(f, "identifier must not carry surrounding whitespace"),
        }
    }
}

impl std::error::Error for IdValidationError {}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct an identifier from raw input.
            pub fn new(
                raw: impl Into<String>,
            ) -> Result<Self, $crate::domain::id::IdValidationError> {
                let raw = raw.into();
                if raw.is_empty() {
                    return Err($crate::domain::id::IdValidationError::Empty);
                }
                if raw.trim() != raw {
                    return Err($crate::domain::id::IdValidationError::Untrimmed);
                }
                Ok(Self(raw))
            }

            /// Generate a fresh UUID-backed identifier.
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4().to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::id::IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

pub(crate) use define_entity_id;
