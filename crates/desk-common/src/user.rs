//! Users and the role hierarchy

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three-tier role hierarchy: `User(1) < Agent(2) < Admin(3)`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// End user filing tickets
    #[default]
    #[serde(rename = "ROLE_USER")]
    User,
    /// Support agent working tickets
    #[serde(rename = "ROLE_AGENT")]
    Agent,
    /// Administrator
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Numeric rank used for hierarchy comparison
    #[inline]
    pub fn rank(&self) -> u8 {
        match self {
            Role::User => 1,
            Role::Agent => 2,
            Role::Admin => 3,
        }
    }

    /// Normalize a wire spelling into a tagged role.
    ///
    /// The upstream API is inconsistent about the `ROLE_` prefix, so
    /// both spellings are accepted here. Anything else is `None` and
    /// ranks as 0 everywhere (fail closed).
    pub fn from_wire(raw: &str) -> Option<Role> {
        match raw {
            "ROLE_USER" | "USER" => Some(Role::User),
            "ROLE_AGENT" | "AGENT" => Some(Role::Agent),
            "ROLE_ADMIN" | "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Wire spelling of this role
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Agent => "ROLE_AGENT",
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A platform user: requester, agent, or administrator
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Email
    pub email: String,

    /// Role (immutable except via the admin role-assignment operation)
    pub role: Role,

    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user with the default `User` role
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: Role::User,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Same user with a different role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// True if this user holds the admin role
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True if this user holds the agent role
    #[inline]
    pub fn is_agent(&self) -> bool {
        self.role == Role::Agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert!(Role::User.rank() < Role::Agent.rank());
        assert!(Role::Agent.rank() < Role::Admin.rank());
    }

    #[test]
    fn test_from_wire_accepts_both_spellings() {
        assert_eq!(Role::from_wire("ROLE_AGENT"), Some(Role::Agent));
        assert_eq!(Role::from_wire("AGENT"), Some(Role::Agent));
        assert_eq!(Role::from_wire("ROLE_ADMIN"), Some(Role::Admin));
    }

    #[test]
    fn test_from_wire_fails_closed() {
        assert_eq!(Role::from_wire("ROLE_SUPERUSER"), None);
        assert_eq!(Role::from_wire("agent"), None);
        assert_eq!(Role::from_wire(""), None);
    }

    #[test]
    fn test_role_serde_wire_spelling() {
        let json = serde_json::to_string(&Role::Agent).unwrap();
        assert_eq!(json, "\"ROLE_AGENT\"");
        let back: Role = serde_json::from_str("\"ROLE_ADMIN\"").unwrap();
        assert_eq!(back, Role::Admin);
    }
}
