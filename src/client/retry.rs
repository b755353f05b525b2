//! Retry policy for the rate-limited transport
//!
//! Failures resolve to one of three named outcomes. A rate-limit signal
//! becomes a scheduled wait until the advertised reset and does not consume
//! the attempt budget; a transient failure earns exponential backoff until
//! the budget runs out; everything else gives up immediately. Keeping the
//! two retry classes on separate counters means a multi-hour quota reset is
//! never mistaken for exhausted retries.

use std::time::Duration;

use crate::error::ApiError;

/// What the transport should do after a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStep {
    /// Sleep until the upstream quota replenishes, then retry.
    /// Does not count against the attempt budget.
    ScheduledWait(Duration),

    /// Sleep a backoff interval, then retry, consuming one attempt
    Backoff(Duration),

    /// Surface the error to the caller
    GiveUp,
}

/// Resolve a failure into the next retry step.
///
/// `attempt` is 1-based and counts tries already made.
pub fn next_step(err: &ApiError, attempt: u32, max_attempts: u32, now_epoch: i64) -> RetryStep {
    match err {
        ApiError::RateLimited { reset_epoch } => {
            let wait_secs = (reset_epoch - now_epoch + 1).max(0) as u64;
            RetryStep::ScheduledWait(Duration::from_secs(wait_secs))
        }
        ApiError::Transient(_) if attempt < max_attempts => {
            RetryStep::Backoff(backoff_delay(attempt))
        }
        ApiError::Transient(_) => RetryStep::GiveUp,
        ApiError::Fatal(_) => RetryStep::GiveUp,
    }
}

/// Exponential backoff: 3^(attempt-1) seconds (1s, 3s, 9s, ...)
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(3u64.pow(attempt.saturating_sub(1)))
}
