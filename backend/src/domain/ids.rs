//! Opaque identifiers for FaceExpo entities.
//!
//! Identifiers are plain strings so seeded records (`"1"`, `"101"`) and
//! generated UUIDs share one representation. The only invariants are that an
//! identifier is non-empty and contains no whitespace.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised while parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The identifier was empty.
    #[error("{kind} must not be empty")]
    Empty {
        /// Which identifier failed validation.
        kind: &'static str,
    },
    /// The identifier contained whitespace.
    #[error("{kind} must not contain whitespace")]
    ContainsWhitespace {
        /// Which identifier failed validation.
        kind: &'static str,
    },
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Validate and construct a ", $kind, ".")]
            pub fn new(id: impl Into<String>) -> Result<Self, IdValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(IdValidationError::Empty { kind: $kind });
                }
                if id.chars().any(char::is_whitespace) {
                    return Err(IdValidationError::ContainsWhitespace { kind: $kind });
                }
                Ok(Self(id))
            }

            #[doc = concat!("Generate a fresh random ", $kind, ".")]
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_id!(
    /// Stable user identifier.
    UserId => "user id"
);
define_id!(
    /// Stable post identifier.
    PostId => "post id"
);
define_id!(
    /// Stable comment identifier.
    CommentId => "comment id"
);
define_id!(
    /// Stable contest entry identifier.
    EntryId => "contest entry id"
);
