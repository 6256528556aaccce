//! HTTP fetcher implementation
//!
//! This module handles the network side of page retrieval:
//! - Building HTTP clients with a fixed user agent and timeout
//! - GET requests that follow redirects
//! - Linear-backoff retries for transport failures only
//! - Classification of the outcome into success, HTTP error, or transport error

use crate::config::FetchConfig;
use reqwest::header::HeaderMap;
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;

/// A response that was received in full
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body decoded as text
    pub body: String,
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// A 2xx or 3xx response
    Success(FetchedPage),

    /// A 4xx or 5xx response; a valid result, never retried
    HttpError(FetchedPage),

    /// Connection, timeout, or body read failure after all attempts
    TransportError {
        /// Description of the last failure
        error: String,
        /// Number of attempts made
        attempts: u32,
    },
}

/// The last transport failure of an operation that ran out of attempts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub error: String,
    pub attempts: u32,
}

/// Attempt budget and backoff for one kind of fetch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchPolicy {
    /// Total number of attempts (at least one is always made)
    pub attempts: u32,
    /// Sleep before attempt `n + 1` is `backoff * n`
    pub backoff: Duration,
}

impl FetchPolicy {
    pub fn new(attempts: u32, backoff: Duration) -> Self {
        Self { attempts, backoff }
    }

    /// Policy for primary page fetches
    pub fn pages(config: &FetchConfig) -> Self {
        Self::new(config.attempts, config.backoff())
    }

    /// Policy for robots.txt fetches
    pub fn robots(config: &FetchConfig) -> Self {
        Self::new(config.robots_attempts, config.backoff())
    }

    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

/// Builds an HTTP client
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header sent with every request
/// * `timeout` - Overall timeout applied to each request
/// * `accept_invalid_certs` - Skip TLS certificate verification
///
/// # Example
///
/// ```no_run
/// use seo_checker::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("SEOChecker/1.0", Duration::from_secs(25), false).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &str,
    timeout: Duration,
    accept_invalid_certs: bool,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .redirect(Policy::limited(10))
        .danger_accept_invalid_certs(accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Runs a network operation, retrying transport failures with linear backoff
///
/// The operation is attempted up to `policy.attempts` times. After failed
/// attempt `n` the task sleeps `policy.backoff * n`; no sleep follows the
/// final attempt.
///
/// # Arguments
///
/// * `url` - The URL being fetched, used for logging
/// * `policy` - Attempt budget and backoff
/// * `op` - Produces one attempt of the operation
pub async fn retry_transport<T, F, Fut>(
    url: &str,
    policy: &FetchPolicy,
    mut op: F,
) -> Result<T, TransportFailure>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let attempts = policy.attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                last_error = describe_error(&e);
                if attempt < attempts {
                    let delay = policy.delay_after(attempt);
                    tracing::warn!(
                        "Attempt {}/{} for {} failed: {}; retrying in {:?}",
                        attempt,
                        attempts,
                        url,
                        last_error,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                } else {
                    tracing::warn!(
                        "Attempt {}/{} for {} failed: {}",
                        attempt,
                        attempts,
                        url,
                        last_error
                    );
                }
            }
        }
    }

    Err(TransportFailure {
        error: last_error,
        attempts,
    })
}

/// Fetches a URL with retry logic
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx / 3xx | Return `Success` |
/// | 4xx / 5xx | Return `HttpError`, no retry |
/// | Timeout, connection error, body read error | Retry with backoff |
/// | Attempts exhausted | Return `TransportError` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `policy` - Attempt budget and backoff
pub async fn fetch_with_retry(client: &Client, url: &str, policy: &FetchPolicy) -> FetchResult {
    match retry_transport(url, policy, || fetch_once(client, url)).await {
        Ok(page) if page.status_code >= 400 => FetchResult::HttpError(page),
        Ok(page) => FetchResult::Success(page),
        Err(TransportFailure { error, attempts }) => {
            FetchResult::TransportError { error, attempts }
        }
    }
}

/// Performs a single GET and reads the whole body
async fn fetch_once(client: &Client, url: &str) -> Result<FetchedPage, reqwest::Error> {
    let response = client.get(url).send().await?;

    let status_code = response.status().as_u16();
    let final_url = response.url().to_string();
    let headers = response.headers().clone();
    let body = response.text().await?;

    Ok(FetchedPage {
        final_url,
        status_code,
        headers,
        body,
    })
}

/// Classifies a transport error into a short human-readable message
pub fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else {
        error.to_string()
    }
}
