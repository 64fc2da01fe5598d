//! Shared types for the EasyDiet backend.
//!
//! Ids, error taxonomy, and the conversation turn types used by every
//! other crate in the workspace.

pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, EasydietError, StoreError};
pub use id::{new_id, ConversationId};
pub use types::{Role, Turn, TurnRecord};

pub type Result<T> = std::result::Result<T, EasydietError>;
