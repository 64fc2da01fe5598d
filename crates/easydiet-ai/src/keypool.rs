//! Rotating API key pool.
//!
//! An ordered, fixed list of upstream credentials with one shared
//! wrapping cursor. The pool is process-wide: many dispatches read it
//! concurrently and mutate it only through `advance()`.
//!
//! The concurrency contract is deliberately weak: the cursor is always
//! in range and advancing always wraps, but under concurrent load two
//! requests may observe the same key or rotate past one another.
//! Approximate fairness is the documented behavior, not exact
//! round-robin.

use std::sync::atomic::{AtomicUsize, Ordering};

use easydiet_common::ConfigError;

/// Fixed pool of API keys with a shared rotation cursor.
pub struct KeyPool {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl KeyPool {
    /// Build a pool from an ordered key list. An empty list is a fatal
    /// configuration error; it is rejected here, at startup, rather
    /// than surfacing per-request.
    pub fn new(keys: Vec<String>) -> Result<Self, ConfigError> {
        if keys.is_empty() {
            return Err(ConfigError::ValidationError(
                "ai.api_keys must contain at least one key".into(),
            ));
        }
        Ok(Self {
            keys,
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key the cursor currently points at.
    pub fn current(&self) -> &str {
        &self.keys[self.cursor.load(Ordering::Relaxed)]
    }

    /// Move the cursor to the next key, wrapping at the end.
    pub fn advance(&self) {
        let len = self.keys.len();
        // fetch_update keeps the stored value in range at all times.
        let _ = self
            .cursor
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |c| {
                Some((c + 1) % len)
            });
    }

    /// Current cursor position. Exposed for tests and diagnostics.
    pub fn position(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for KeyPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPool")
            .field("keys", &format!("[{} redacted]", self.keys.len()))
            .field("cursor", &self.position())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pool_is_rejected() {
        let err = KeyPool::new(Vec::new()).unwrap_err();
        assert!(err.to_string().contains("ai.api_keys"));
    }

    #[test]
    fn single_key_pool_wraps_to_itself() {
        let pool = KeyPool::new(vec!["KEY_1".into()]).unwrap();
        assert_eq!(pool.current(), "KEY_1");
        pool.advance();
        assert_eq!(pool.current(), "KEY_1");
        assert_eq!(pool.position(), 0);
    }

    #[test]
    fn advance_walks_in_order_and_wraps() {
        let pool = KeyPool::new(vec!["A".into(), "B".into(), "C".into()]).unwrap();
        assert_eq!(pool.current(), "A");
        pool.advance();
        assert_eq!(pool.current(), "B");
        pool.advance();
        assert_eq!(pool.current(), "C");
        pool.advance();
        assert_eq!(pool.current(), "A");
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let pool = KeyPool::new(vec!["A".into(), "B".into(), "C".into(), "D".into()]).unwrap();
        let start = pool.position();
        for _ in 0..pool.len() {
            pool.advance();
        }
        assert_eq!(pool.position(), start);
    }

    #[test]
    fn debug_redacts_keys() {
        let pool = KeyPool::new(vec!["secret-key".into()]).unwrap();
        let debug = format!("{pool:?}");
        assert!(!debug.contains("secret-key"));
    }
}
