//! Retry loop: run a fetch closure until success or the policy gives up.

use super::classify::classify;
use super::error::SegmentError;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs `f` until it succeeds or the policy says to stop. On a retryable
/// failure, sleeps for the backoff duration and tries again.
pub fn run_with_retry<F>(policy: &RetryPolicy, mut f: F) -> Result<(), SegmentError>
where
    F: FnMut() -> Result<(), SegmentError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(()) => return Ok(()),
            Err(e) => match policy.decide(attempt, classify(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(delay) => {
                    tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, error = %e, "retrying segment");
                    std::thread::sleep(delay);
                    attempt += 1;
                }
            },
        }
    }
}
