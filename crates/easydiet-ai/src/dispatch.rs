//! Request dispatch with key rotation and failover.
//!
//! One logical upstream request gets at most `pool.len()` attempts,
//! each bound to the pool's current key. The cursor advances on
//! success as well as on retryable failure: advancing on success
//! spreads load across keys over time, advancing on failure isolates
//! an exhausted key to a single wasted attempt.

use std::future::Future;

use tracing::debug;

use crate::keypool::KeyPool;
use crate::AiError;

/// Dispatch one logical request, rotating across the key pool.
///
/// `attempt` is called with the key to bind this attempt to. Retryable
/// failures (quota, credential rejection) rotate to the next key;
/// anything else aborts immediately. If every key fails retryably, the
/// last failure is returned.
pub async fn dispatch_with_rotation<T, F, Fut>(
    pool: &KeyPool,
    mut attempt: F,
) -> Result<T, AiError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, AiError>>,
{
    let max_attempts = pool.len();
    let mut last_err = None;

    for n in 1..=max_attempts {
        let key = pool.current().to_string();
        match attempt(key).await {
            Ok(value) => {
                pool.advance();
                return Ok(value);
            }
            Err(e) if e.retryable() => {
                debug!(attempt = n, max_attempts, error = %e, "retryable upstream failure, rotating key");
                pool.advance();
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    // The pool is non-empty by construction, so at least one attempt ran.
    Err(last_err.unwrap_or_else(|| AiError::ApiError("no dispatch attempts made".into())))
}
