//! Shared HTTP transport with bounded retry for transient server errors

use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::{RetryTransientMiddleware, Retryable, RetryableStrategy};

/// Backoff before the first retry; doubles per attempt.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

const USER_AGENT: &str = concat!("Weathercast/", env!("CARGO_PKG_VERSION"));

/// Retry only transient server errors.
///
/// The provider documents 5xx responses as "retry the request"; every other
/// status (400/401/404/429) and all transport-level failures are terminal
/// and classified by the caller. All session traffic is GET, so the retry
/// is idempotent.
struct ServerErrorStrategy;

impl RetryableStrategy for ServerErrorStrategy {
    fn handle(
        &self,
        res: &Result<reqwest::Response, reqwest_middleware::Error>,
    ) -> Option<Retryable> {
        match res {
            Ok(response) if matches!(response.status().as_u16(), 500 | 502 | 503 | 504) => {
                Some(Retryable::Transient)
            }
            _ => None,
        }
    }
}

/// Build the process-wide HTTP session.
///
/// The session is constructed once at startup, cloned into both API
/// clients, and is read-only afterwards; the underlying connection pool is
/// shared across requests. Retries up to `max_retries` times on HTTP
/// 500/502/503/504 with exponential backoff seeded at one second.
pub fn build_session(timeout: Duration, max_retries: u32) -> anyhow::Result<ClientWithMiddleware> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")?;

    let policy = ExponentialBackoff::builder()
        .retry_bounds(RETRY_BACKOFF, RETRY_BACKOFF * 8)
        .build_with_max_retries(max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy_and_strategy(
            policy,
            ServerErrorStrategy,
        ))
        .build())
}
