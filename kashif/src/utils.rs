use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use crate::Result;
use crate::config::RetryPolicy;
use crate::constants::SKIPPED_SLOT_ERROR;

/// Calculate exponential backoff with jitter
pub fn calculate_backoff_with_jitter(
    attempt: usize,
    base_delay_ms: u64,
    max_delay_ms: u64,
) -> Duration {
    let exponential_delay = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt as u32));

    let capped_delay = exponential_delay.min(max_delay_ms);

    // ±25% jitter
    let mut rng = rand::rng();
    let jitter_range = (capped_delay as f64 * 0.25) as u64;
    let jitter = rng.random_range(0..=jitter_range * 2);
    let final_delay = capped_delay.saturating_add(jitter).saturating_sub(jitter_range);

    Duration::from_millis(final_delay)
}

/// Check if an error message indicates a rate limit or timeout that should be retried
pub fn is_retryable_error(error_msg: &str) -> bool {
    error_msg.contains("429")
        || error_msg.contains("timed out")
        || error_msg.contains("timeout")
        || error_msg.contains("connection reset")
        || error_msg.contains("connection refused")
        || error_msg.contains("connection failed")
        || error_msg.contains("Too Many Requests")
}

/// Check if an RPC error reports a slot that produced no block
pub fn is_skipped_slot_error(error_msg: &str) -> bool {
    error_msg.contains(SKIPPED_SLOT_ERROR)
}

pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Run `operation`, retrying retryable failures as the policy allows.
/// With `max_retries == 0` the first error is returned as is.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                let error_string = format!("{:#}", e);
                if attempt >= policy.max_retries || !is_retryable_error(&e.root_cause().to_string()) {
                    return Err(e);
                }

                let backoff_delay =
                    calculate_backoff_with_jitter(attempt, policy.base_retry_delay_ms, policy.max_retry_delay_ms);
                warn!(
                    "retrying_after_backoff::{}::attempt::{}::delay_ms::{}::error::{}",
                    operation_name,
                    attempt + 1,
                    backoff_delay.as_millis(),
                    error_string
                );
                tokio::time::sleep(backoff_delay).await;
                attempt += 1;
            },
        }
    }
}

/// Case-insensitive address comparison used when matching account keys
pub fn same_address(
    a: &str,
    b: &str,
) -> bool {
    a.eq_ignore_ascii_case(b)
}
