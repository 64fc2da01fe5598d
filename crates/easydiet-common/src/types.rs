//! Conversation turn types.
//!
//! A `Turn` is one message in a conversation, tagged with its speaker
//! role and a monotonic sequence marker. The sequence marker is the
//! sole ordering guarantee; storage backends may return rows in any
//! order.

use serde::{Deserialize, Serialize};

/// Speaker of a turn. Only these two roles are valid in model context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Parse a stored role string. Returns `None` for anything that is
    /// not a valid context role, so callers can filter defensively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Role::User),
            "model" => Some(Role::Model),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// A validated turn, ready for model context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    /// Monotonic per-conversation marker; lower = older.
    pub sequence: u64,
}

/// A turn as the persistence layer hands it back: the role is an
/// unvalidated string and may hold values this core does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub role: String,
    pub text: String,
    pub sequence: u64,
}
