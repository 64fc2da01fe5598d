//! AI engine for EasyDiet.
//!
//! Routes chat turns to the Gemini API across a rotating pool of API
//! keys, keeps a bounded per-conversation history window, and
//! opportunistically extracts nutrition-profile updates from free
//! text. Provides:
//! - Key pool rotation with failover on quota/authorization errors
//! - A bounded conversation window over a pluggable history store
//! - A pure profile diffing engine (parse / diff / render)
//! - The chat service tying generation and extraction together

pub mod dispatch;
pub mod gemini;
pub mod history;
pub mod keypool;
pub mod profile;
pub mod prompts;
pub mod service;

use async_trait::async_trait;

use easydiet_common::Turn;

pub use dispatch::dispatch_with_rotation;
pub use gemini::{GeminiClient, GeminiConfig, GeminiFactory};
pub use history::{HistoryStore, HistoryWindow, MemoryHistoryStore};
pub use keypool::KeyPool;
pub use profile::{MemoryProfileStore, Profile, ProfileField, ProfileStore, UpdateSet};
pub use service::{ChatError, ChatOutcome, ChatService};

/// Output shape requested from the upstream model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    Json,
}

impl ResponseFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ResponseFormat::Text => "text/plain",
            ResponseFormat::Json => "application/json",
        }
    }
}

/// One upstream generation call, bound to a single credential.
///
/// An empty reply is a valid success; degenerate-reply handling is a
/// caller concern.
#[async_trait]
pub trait GenerateClient: Send + Sync {
    async fn generate(
        &self,
        turns: &[Turn],
        system_instruction: &str,
        format: ResponseFormat,
    ) -> Result<String, AiError>;
}

/// Produces a client bound to a specific API key from the pool.
///
/// This is the "bind the request to the current credential" step of a
/// dispatch attempt; the dispatcher decides which key to hand in.
pub trait ClientFactory: Send + Sync {
    fn for_key(&self, api_key: &str) -> std::sync::Arc<dyn GenerateClient>;
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("rate limited")]
    RateLimited,
    #[error("credential rejected: {0}")]
    Unauthorized(String),
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("timeout")]
    Timeout,
}

impl AiError {
    /// Whether the failure is attributable to the credential in use
    /// (quota or authorization), and so worth retrying on another key.
    /// Everything else aborts the dispatch on first occurrence.
    pub fn retryable(&self) -> bool {
        matches!(self, AiError::RateLimited | AiError::Unauthorized(_))
    }
}
