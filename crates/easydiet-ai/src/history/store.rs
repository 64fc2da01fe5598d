//! History persistence seam and the in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use easydiet_common::{ConversationId, Role, StoreError, TurnRecord};

/// Per-conversation turn storage. Implementations assign the monotonic
/// sequence marker on append and must honor read-your-writes for the
/// same conversation id.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// All stored turns for a conversation, in no guaranteed order.
    /// Roles come back as raw strings; validation is the window's job.
    async fn history(&self, conversation: &ConversationId) -> Result<Vec<TurnRecord>, StoreError>;

    /// Append one turn, assigning the next sequence marker. Returns
    /// the marker assigned.
    async fn append_turn(
        &self,
        conversation: &ConversationId,
        role: Role,
        text: &str,
    ) -> Result<u64, StoreError>;

    /// Delete every turn with `sequence < before`. Returns how many
    /// were removed.
    async fn remove_turns_before(
        &self,
        conversation: &ConversationId,
        before: u64,
    ) -> Result<usize, StoreError>;
}

#[derive(Default)]
struct MemoryConversation {
    next_sequence: u64,
    turns: Vec<TurnRecord>,
}

/// In-memory `HistoryStore` for tests and single-process embedders.
#[derive(Default)]
pub struct MemoryHistoryStore {
    conversations: RwLock<HashMap<ConversationId, MemoryConversation>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw record directly, bypassing role validation. Lets
    /// tests model persistence-layer drift (unknown roles).
    pub async fn insert_raw(&self, conversation: &ConversationId, role: &str, text: &str) {
        let mut conversations = self.conversations.write().await;
        let entry = conversations.entry(conversation.clone()).or_default();
        let sequence = entry.next_sequence;
        entry.next_sequence += 1;
        entry.turns.push(TurnRecord {
            role: role.to_string(),
            text: text.to_string(),
            sequence,
        });
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn history(&self, conversation: &ConversationId) -> Result<Vec<TurnRecord>, StoreError> {
        let conversations = self.conversations.read().await;
        Ok(conversations
            .get(conversation)
            .map(|c| c.turns.clone())
            .unwrap_or_default())
    }

    async fn append_turn(
        &self,
        conversation: &ConversationId,
        role: Role,
        text: &str,
    ) -> Result<u64, StoreError> {
        let mut conversations = self.conversations.write().await;
        let entry = conversations.entry(conversation.clone()).or_default();
        let sequence = entry.next_sequence;
        entry.next_sequence += 1;
        entry.turns.push(TurnRecord {
            role: role.as_str().to_string(),
            text: text.to_string(),
            sequence,
        });
        Ok(sequence)
    }

    async fn remove_turns_before(
        &self,
        conversation: &ConversationId,
        before: u64,
    ) -> Result<usize, StoreError> {
        let mut conversations = self.conversations.write().await;
        let Some(entry) = conversations.get_mut(conversation) else {
            return Ok(0);
        };
        let len_before = entry.turns.len();
        entry.turns.retain(|t| t.sequence >= before);
        Ok(len_before - entry.turns.len())
    }
}
