//! Clock and sleep abstraction
//!
//! The transport's two retry classes (scheduled rate-limit waits and
//! exponential backoff) both go through this trait, so tests can observe
//! sleeps and advance time without real delays.

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

/// Time source and sleep used by the rate-limited transport
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current Unix time in seconds
    fn now_epoch(&self) -> i64;

    /// Suspend the caller for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock implementation backed by tokio's timer
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now_epoch(&self) -> i64 {
        Utc::now().timestamp()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
