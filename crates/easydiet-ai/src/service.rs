//! Chat orchestration: generation plus best-effort profile extraction.
//!
//! One chat turn appends the user message, builds context from the
//! trimmed window and the rendered profile, dispatches generation
//! across the key pool, appends the reply, then runs the extraction
//! side call. Extraction is a secondary enrichment: any upstream
//! failure there is swallowed and the turn still succeeds.

use std::sync::Arc;

use tracing::warn;

use easydiet_common::{ConfigError, ConversationId, Role, StoreError, Turn};
use easydiet_config::EasydietConfig;

use crate::dispatch::dispatch_with_rotation;
use crate::gemini::GeminiFactory;
use crate::history::{HistoryStore, HistoryWindow};
use crate::keypool::KeyPool;
use crate::profile::{diff, parse_candidate, Profile, ProfileStore, UpdateSet};
use crate::{prompts, AiError, ClientFactory, ResponseFormat};

/// Sentinel reply for a successful upstream call that produced no
/// text. Surfaced to the user as a normal reply, not an error.
pub const NO_RESPONSE: &str = "(no response)";

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    Ai(#[from] AiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of one chat turn.
#[derive(Debug)]
pub struct ChatOutcome {
    pub reply: String,
    pub conversation_id: ConversationId,
    /// Profile fields that changed this turn; empty when extraction
    /// found nothing or failed.
    pub profile_updates: UpdateSet,
}

/// The chat service: key pool, upstream clients, history window, and
/// profile storage behind one entry point.
pub struct ChatService {
    pool: KeyPool,
    clients: Arc<dyn ClientFactory>,
    window: HistoryWindow,
    profiles: Arc<dyn ProfileStore>,
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService").finish_non_exhaustive()
    }
}

impl ChatService {
    /// Build a service talking to the real Gemini API.
    pub fn new(
        config: &EasydietConfig,
        history: Arc<dyn HistoryStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Result<Self, ConfigError> {
        let pool = KeyPool::new(config.ai.api_keys.clone())?;
        let clients = Arc::new(GeminiFactory::new(config.ai.clone()));
        Ok(Self::with_clients(
            pool,
            clients,
            history,
            config.history.max_turn_pairs,
            profiles,
        ))
    }

    /// Build a service with an explicit client factory. Used by tests
    /// and embedders that supply their own upstream.
    pub fn with_clients(
        pool: KeyPool,
        clients: Arc<dyn ClientFactory>,
        history: Arc<dyn HistoryStore>,
        max_turn_pairs: usize,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            pool,
            clients,
            window: HistoryWindow::new(history, max_turn_pairs),
            profiles,
        }
    }

    /// Run one chat turn. A missing conversation id starts a new
    /// conversation.
    pub async fn chat(
        &self,
        user_id: &str,
        conversation: Option<ConversationId>,
        message: &str,
    ) -> Result<ChatOutcome, ChatError> {
        let conversation = conversation.unwrap_or_default();

        self.window
            .append(&conversation, Role::User, message)
            .await?;

        let context = self.window.read_context(&conversation).await?;
        let profile = self.profiles.profile(user_id).await?;
        let instruction = prompts::chat_instruction(&profile);

        let reply = dispatch_with_rotation(&self.pool, |key| {
            let client = self.clients.for_key(&key);
            let context = context.as_slice();
            let instruction = instruction.as_str();
            async move {
                client
                    .generate(context, instruction, ResponseFormat::Text)
                    .await
            }
        })
        .await?;

        let reply = if reply.trim().is_empty() {
            NO_RESPONSE.to_string()
        } else {
            reply
        };

        self.window
            .append(&conversation, Role::Model, &reply)
            .await?;

        let profile_updates = self.detect_profile_updates(message, &profile).await;
        if !profile_updates.is_empty() {
            self.profiles
                .apply_update(user_id, &profile_updates)
                .await?;
        }

        Ok(ChatOutcome {
            reply,
            conversation_id: conversation,
            profile_updates,
        })
    }

    /// Best-effort extraction of profile changes from the raw message.
    /// Never fails: upstream exhaustion or malformed output both
    /// degrade to an empty update set.
    async fn detect_profile_updates(&self, message: &str, profile: &Profile) -> UpdateSet {
        let prompt = prompts::extraction_prompt(profile, message);
        let turns = vec![Turn {
            role: Role::User,
            text: prompt,
            sequence: 0,
        }];

        let raw = match dispatch_with_rotation(&self.pool, |key| {
            let client = self.clients.for_key(&key);
            let turns = turns.as_slice();
            async move {
                client
                    .generate(turns, prompts::EXTRACTION_INSTRUCTION, ResponseFormat::Json)
                    .await
            }
        })
        .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "profile extraction failed, skipping profile update");
                return UpdateSet::new();
            }
        };

        diff(profile, &parse_candidate(&raw))
    }
}
