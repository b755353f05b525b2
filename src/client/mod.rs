//! GitHub API client
//!
//! The transport (`github`) issues the HTTP calls and absorbs rate-limit
//! and transient failures per the retry policy (`retry`); time is injected
//! through `clock` so both retry classes are testable without wall-clock
//! delays.

pub mod clock;
pub mod github;
pub mod models;
pub mod retry;

pub use clock::{Clock, SystemClock};
pub use github::{DEFAULT_API_BASE, GithubClient};
pub use models::{IssueState, RawIssue, RawLicense, RawRepo};
pub use retry::{RetryStep, backoff_delay, next_step};

/// Resolve the API base URL, honoring the test/dev override
pub fn api_base_url() -> String {
    std::env::var("ORGPULSE_API_HOST")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}
