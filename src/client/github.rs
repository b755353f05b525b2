//! GitHub API transport with rate-limit handling

use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, Response, StatusCode};

use super::clock::{Clock, SystemClock};
use super::retry::{self, RetryStep};
use crate::error::{ApiError, Result};

/// GitHub API base URL
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Courtesy ceiling on request rate, applied before every call.
/// The reactive reset-header handling below deals with actual quota.
const REQUESTS_PER_SECOND: u32 = 5;

/// GitHub API client wrapping raw HTTP calls with the retry policy
pub struct GithubClient {
    http: HttpClient,
    base_url: String,
    token: Option<String>,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    clock: Arc<dyn Clock>,
    max_attempts: u32,
}

impl GithubClient {
    /// Create a client against `base_url` using the wall clock
    pub fn new(base_url: impl Into<String>, token: Option<String>, max_attempts: u32) -> Result<Self> {
        Self::with_clock(base_url, token, max_attempts, Arc::new(SystemClock))
    }

    /// Create a client with an injected clock (used by tests to observe
    /// sleeps instead of waiting them out)
    pub fn with_clock(
        base_url: impl Into<String>,
        token: Option<String>,
        max_attempts: u32,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("orgpulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transient(e.to_string()))?;

        let quota = Quota::per_second(
            std::num::NonZeroU32::new(REQUESTS_PER_SECOND).unwrap_or(std::num::NonZeroU32::MIN),
        );

        Ok(Self {
            http,
            base_url: base_url.into(),
            token,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
            clock,
            max_attempts,
        })
    }

    /// GET a path with query parameters, returning the raw body.
    ///
    /// Rate-limit responses with an exhausted quota cause a scheduled sleep
    /// until the advertised reset, then a retry, without consuming the
    /// attempt budget. Transient failures back off exponentially for at
    /// most `max_attempts` tries. Fatal failures surface immediately.
    pub async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<String> {
        let mut attempt: u32 = 1;

        loop {
            self.rate_limiter.until_ready().await;

            let err = match self.try_get(path, params).await {
                Ok(body) => return Ok(body),
                Err(err) => err,
            };

            match retry::next_step(&err, attempt, self.max_attempts, self.clock.now_epoch()) {
                RetryStep::ScheduledWait(wait) => {
                    log::warn!(
                        "Rate limit reached on {}, sleeping {}s until quota resets",
                        path,
                        wait.as_secs()
                    );
                    self.clock.sleep(wait).await;
                }
                RetryStep::Backoff(delay) => {
                    log::warn!(
                        "Request to {} failed (attempt {}), retrying in {}s: {}",
                        path,
                        attempt,
                        delay.as_secs(),
                        err
                    );
                    self.clock.sleep(delay).await;
                    attempt += 1;
                }
                RetryStep::GiveUp => return Err(err.into()),
            }
        }
    }

    /// Single request issue + response classification
    async fn try_get(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> std::result::Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.get(&url).query(params);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status.is_success() {
            return response
                .text()
                .await
                .map_err(|e| ApiError::Transient(format!("failed to read body: {}", e)));
        }

        if let Some(reset_epoch) = rate_limit_reset(&response) {
            return Err(ApiError::RateLimited { reset_epoch });
        }

        match status {
            StatusCode::UNAUTHORIZED => {
                Err(ApiError::Fatal("authentication rejected (401)".to_string()))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Err(ApiError::Fatal(
                format!("malformed request to {} ({})", path, status),
            )),
            StatusCode::NOT_FOUND => Err(ApiError::Fatal(format!("not found: {}", path))),
            status if status.is_server_error() => Err(ApiError::Transient(format!(
                "server error ({}) from {}",
                status, path
            ))),
            status => Err(ApiError::Transient(format!(
                "unexpected status {} from {}",
                status, path
            ))),
        }
    }
}

/// Extract the reset epoch from a rate-limit response.
///
/// GitHub signals primary rate limiting with 403 or 429 plus
/// `x-ratelimit-remaining: 0` and `x-ratelimit-reset`. Anything else,
/// including a 429 without the headers, falls through to the generic
/// failure classes.
fn rate_limit_reset(response: &Response) -> Option<i64> {
    let status = response.status();
    if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
        return None;
    }

    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    if header("x-ratelimit-remaining").as_deref() != Some("0") {
        return None;
    }

    header("x-ratelimit-reset").and_then(|v| v.parse::<i64>().ok())
}
