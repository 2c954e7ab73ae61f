//! Bounded retry with linear backoff
//!
//! Wraps a request-producing operation in up to `max_attempts` tries.
//! Between attempts the failure is recorded against the active endpoint
//! and, when a reachable alternate exists, the active endpoint is swapped
//! before waiting `base_delay * attempt`. The executor never fabricates a
//! success: when the final attempt fails, the failure propagates wrapped
//! in [`FetchError::RetriesExhausted`].

use std::future::Future;
use tokio::time::sleep;
use tracing::debug;

use crate::config::RetryPolicy;
use crate::endpoint::EndpointResolver;
use crate::error::FetchError;

/// Run `operation` with up to `policy.max_attempts` tries
///
/// The operation is re-invoked from scratch on each attempt, so it must
/// read the active endpoint itself; that is what makes the between-attempt
/// swap effective. A `max_attempts` of 1 (or 0, clamped) means a single
/// attempt with immediate propagation.
pub async fn execute_with_retry<T, F, Fut>(
    resolver: &EndpointResolver,
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                resolver.note_active_success();
                return Ok(value);
            }
            Err(error) if attempt < max_attempts => {
                debug!(attempt, max_attempts, %error, "request attempt failed, will retry");
                resolver.note_active_failure();
                resolver.swap_if_unreachable();
                sleep(policy.base_delay * attempt).await;
                attempt += 1;
            }
            Err(error) => {
                resolver.note_active_failure();
                return Err(FetchError::RetriesExhausted {
                    attempts: max_attempts,
                    last: Box::new(error),
                });
            }
        }
    }
}
