//! Retry with exponential back-off and jitter for the shopping API client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, 429, 5xx). Upstream `"error"`
//! responses are returned immediately: an invalid key or exhausted plan does
//! not recover within one search request.

use std::future::Future;
use std::time::Duration;

use crate::error::SerpApiError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 429 and 5xx responses.
///
/// **Not retriable:**
/// - [`SerpApiError::Upstream`]: the API explained why it refused.
/// - [`SerpApiError::Deserialize`]: malformed response.
/// - [`SerpApiError::InvalidBaseUrl`]: configuration error.
pub(crate) fn is_retriable(err: &SerpApiError) -> bool {
    match err {
        SerpApiError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        SerpApiError::UnexpectedStatus { status } => *status == 429 || *status >= 500,
        SerpApiError::Upstream(_)
        | SerpApiError::Deserialize { .. }
        | SerpApiError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The n-th retry sleeps `backoff_base_ms × 2ⁿ⁻¹ ± 25 %`, capped at 5 s so a
/// retry never eats the whole search deadline. Non-retriable errors are
/// returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, SerpApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SerpApiError>>,
{
    const MAX_DELAY_MS: u64 = 5_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "shopping API transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
