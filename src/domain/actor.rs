//! Actors

use std::str::FromStr;

use thiserror::Error;

use crate::uuids::TypedUuid;

/// Marker for user identifiers owned by the accounts system.
///
/// The core never loads user records; it only compares ownership uuids.
#[derive(Debug)]
pub struct UserRef;

/// User UUID
pub type UserUuid = TypedUuid<UserRef>;

/// The party performing an operation, as resolved by the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// A signed-in customer acting on their own orders.
    User(UserUuid),
    /// A back-office operator, with an optional display name for the audit
    /// trail.
    Admin { name: Option<String> },
    /// Internal transitions (checkout, payment webhooks, expiry sweeps).
    System,
}

impl Actor {
    #[must_use]
    pub fn kind(&self) -> ActorKind {
        match self {
            Self::User(_) => ActorKind::User,
            Self::Admin { .. } => ActorKind::Admin,
            Self::System => ActorKind::System,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin { .. })
    }

    /// Name recorded alongside the actor kind in history entries.
    #[must_use]
    pub(crate) fn audit_name(&self) -> Option<String> {
        match self {
            Self::User(uuid) => Some(uuid.to_string()),
            Self::Admin { name } => name.clone(),
            Self::System => None,
        }
    }
}

/// Actor classification as persisted in the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    User,
    Admin,
    System,
}

impl ActorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::System => "system",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown actor kind {0:?}")]
pub struct ParseActorKindError(String);

impl FromStr for ActorKind {
    type Err = ParseActorKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "system" => Ok(Self::System),
            other => Err(ParseActorKindError(other.to_string())),
        }
    }
}
