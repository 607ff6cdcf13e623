//! OpenDesk Common - Shared domain types for the support platform
//!
//! This crate provides the domain model consumed by the rules engine and
//! the store layer:
//! - Users and the three-tier role hierarchy
//! - Tickets, statuses, priorities, comments, attachments
//! - Error handling
//!
//! Wire spellings match the upstream REST API (`ROLE_AGENT`,
//! `IN_PROGRESS`, `URGENT`). Any duck-typed role representation coming
//! off the wire is normalized exactly once, at deserialization, into the
//! tagged enums here; internal code never branches on strings.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ticket;
pub mod user;

pub use error::*;
pub use ticket::*;
pub use user::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier received from the API
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint a fresh random identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

opaque_id! {
    /// Opaque user identifier
    UserId
}

opaque_id! {
    /// Opaque ticket identifier
    TicketId
}

opaque_id! {
    /// Opaque comment identifier
    CommentId
}

opaque_id! {
    /// Opaque attachment identifier
    AttachmentId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = TicketId::new("tkt-001");
        assert_eq!(id.as_str(), "tkt-001");
        assert_eq!(id.to_string(), "tkt-001");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"tkt-001\"");
        let back: TicketId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(UserId::generate(), UserId::generate());
    }
}
