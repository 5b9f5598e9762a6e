//! Exponential backoff for listing page requests.
//!
//! Only content paging goes through here. Token exchange and the scoring
//! service are never retried.

use std::future::Future;
use std::time::Duration;

use crate::error::RedditError;

const MAX_DELAY_MS: u64 = 60_000;

/// Rate limits, 5xx responses, and network timeouts or refused connections.
pub(crate) fn is_retriable(err: &RedditError) -> bool {
    match err {
        RedditError::RateLimited { .. } => true,
        RedditError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        RedditError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        RedditError::Auth(_) | RedditError::Deserialize { .. } | RedditError::InvalidBaseUrl(_) => {
            false
        }
    }
}

/// Delay before retry number `attempt` (1-based): `base * 2^(attempt-1)`,
/// raised to the server's `Retry-After` when that is longer, capped at 60 s.
fn backoff_delay_ms(err: &RedditError, attempt: u32, backoff_base_ms: u64) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(20));
    let requested = match err {
        RedditError::RateLimited {
            retry_after_secs: Some(secs),
            ..
        } => secs.saturating_mul(1000),
        _ => 0,
    };
    computed.max(requested).min(MAX_DELAY_MS)
}

/// Run `operation`, retrying transient failures up to `max_retries` times.
///
/// With `max_retries = 3` the operation runs at most four times. The last
/// error is returned once retries are exhausted; non-retriable errors are
/// returned at once.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, RedditError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RedditError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = backoff_delay_ms(&err, attempt, backoff_base_ms);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient Reddit error, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
