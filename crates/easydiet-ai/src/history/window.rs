//! The bounded conversation window.

use std::sync::Arc;

use easydiet_common::{ConversationId, Role, StoreError, Turn};

use super::store::HistoryStore;

/// Maintains the newest-N-pairs view of a conversation over any
/// `HistoryStore`, trimming storage beyond the retention bound.
pub struct HistoryWindow {
    store: Arc<dyn HistoryStore>,
    max_pairs: usize,
}

impl HistoryWindow {
    pub fn new(store: Arc<dyn HistoryStore>, max_pairs: usize) -> Self {
        Self { store, max_pairs }
    }

    fn max_turns(&self) -> usize {
        self.max_pairs * 2
    }

    /// Append one turn and trim eagerly. Returns the sequence marker
    /// the store assigned.
    pub async fn append(
        &self,
        conversation: &ConversationId,
        role: Role,
        text: &str,
    ) -> Result<u64, StoreError> {
        let sequence = self.store.append_turn(conversation, role, text).await?;
        self.trim(conversation).await?;
        Ok(sequence)
    }

    /// The context view: the most recent `2N` turns in ascending
    /// sequence order. Turns with unrecognized roles are silently
    /// excluded; the persistence layer may hold rows this core does
    /// not understand.
    pub async fn read_context(
        &self,
        conversation: &ConversationId,
    ) -> Result<Vec<Turn>, StoreError> {
        let mut records = self.store.history(conversation).await?;
        records.sort_by_key(|r| r.sequence);

        let mut turns: Vec<Turn> = records
            .into_iter()
            .filter_map(|record| {
                Role::parse(&record.role).map(|role| Turn {
                    role,
                    text: record.text,
                    sequence: record.sequence,
                })
            })
            .collect();

        let max = self.max_turns();
        if turns.len() > max {
            turns.drain(..turns.len() - max);
        }
        Ok(turns)
    }

    /// Delete the oldest turns so at most `2N` remain. Deterministic:
    /// lower sequence = older = deleted first. Safe to call at any
    /// time; a partially trimmed conversation is healed on the next
    /// call.
    pub async fn trim(&self, conversation: &ConversationId) -> Result<(), StoreError> {
        let mut records = self.store.history(conversation).await?;
        let max = self.max_turns();
        if records.len() <= max {
            return Ok(());
        }

        records.sort_by_key(|r| r.sequence);
        let cutoff = records[records.len() - max].sequence;
        self.store
            .remove_turns_before(conversation, cutoff)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistoryStore;

    fn window(max_pairs: usize) -> (HistoryWindow, Arc<MemoryHistoryStore>) {
        let store = Arc::new(MemoryHistoryStore::new());
        (HistoryWindow::new(store.clone(), max_pairs), store)
    }

    async fn fill_pairs(w: &HistoryWindow, cid: &ConversationId, pairs: usize) {
        for i in 0..pairs {
            w.append(cid, Role::User, &format!("user {i}")).await.unwrap();
            w.append(cid, Role::Model, &format!("model {i}")).await.unwrap();
        }
    }

    #[tokio::test]
    async fn context_is_ascending_and_complete_below_bound() {
        let (window, _) = window(3);
        let cid = ConversationId::new();
        fill_pairs(&window, &cid, 2).await;

        let context = window.read_context(&cid).await.unwrap();
        assert_eq!(context.len(), 4);
        assert!(context.windows(2).all(|w| w[0].sequence < w[1].sequence));
        assert_eq!(context[0].text, "user 0");
        assert_eq!(context[3].text, "model 1");
    }

    #[tokio::test]
    async fn overflow_keeps_only_newest_pairs() {
        // N=2, 3 pairs appended: only the last 2 pairs (4 turns) remain.
        let (window, store) = window(2);
        let cid = ConversationId::new();
        fill_pairs(&window, &cid, 3).await;

        let context = window.read_context(&cid).await.unwrap();
        assert_eq!(context.len(), 4);
        assert_eq!(context[0].text, "user 1");
        assert_eq!(context[1].text, "model 1");
        assert_eq!(context[2].text, "user 2");
        assert_eq!(context[3].text, "model 2");

        // Eager trim also reclaimed storage.
        assert_eq!(store.history(&cid).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn unrecognized_roles_are_excluded_from_context() {
        let (window, store) = window(5);
        let cid = ConversationId::new();

        store.insert_raw(&cid, "user", "hello").await;
        store.insert_raw(&cid, "system", "drifted row").await;
        store.insert_raw(&cid, "model", "hi there").await;
        store.insert_raw(&cid, "assistant", "wrong vocabulary").await;

        let context = window.read_context(&cid).await.unwrap();
        assert_eq!(context.len(), 2);
        assert_eq!(context[0].role, Role::User);
        assert_eq!(context[1].role, Role::Model);
    }

    #[tokio::test]
    async fn trim_heals_oversized_conversation() {
        // Rows written behind the window's back, as after a crashed trim.
        let (window, store) = window(1);
        let cid = ConversationId::new();
        for i in 0..7 {
            store.insert_raw(&cid, "user", &format!("m{i}")).await;
        }

        window.trim(&cid).await.unwrap();
        let remaining = store.history(&cid).await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].text, "m5");
        assert_eq!(remaining[1].text, "m6");
    }

    #[tokio::test]
    async fn trim_below_bound_is_noop() {
        let (window, store) = window(3);
        let cid = ConversationId::new();
        fill_pairs(&window, &cid, 1).await;

        window.trim(&cid).await.unwrap();
        assert_eq!(store.history(&cid).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn trim_does_not_enforce_pair_parity() {
        // Trimming is strictly by recency; the retained window may
        // open on a model turn.
        let (window, store) = window(1);
        let cid = ConversationId::new();
        store.insert_raw(&cid, "user", "a").await;
        store.insert_raw(&cid, "model", "b").await;
        store.insert_raw(&cid, "user", "c").await;

        window.trim(&cid).await.unwrap();
        let context = window.read_context(&cid).await.unwrap();
        assert_eq!(context.len(), 2);
        assert_eq!(context[0].role, Role::Model);
        assert_eq!(context[1].role, Role::User);
    }

    #[tokio::test]
    async fn conversations_are_isolated() {
        let (window, _) = window(1);
        let first = ConversationId::new();
        let second = ConversationId::new();
        fill_pairs(&window, &first, 1).await;

        assert_eq!(window.read_context(&first).await.unwrap().len(), 2);
        assert!(window.read_context(&second).await.unwrap().is_empty());
    }
}
