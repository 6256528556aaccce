//! Robots.txt handling module
//!
//! This module fetches a site's robots.txt for every analyzed page and
//! classifies the page's crawl permission. Rule sets are rebuilt per page
//! and never cached.

mod parser;

pub use parser::RobotsRuleSet;

use crate::crawler::{fetch_with_retry, FetchPolicy, FetchResult};
use reqwest::Client;
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

/// Crawl permission of a page as reported in the Robots Policy column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotsVerdict {
    Allowed,
    Disallowed,
    /// robots.txt could not be retrieved
    FetchError,
    /// robots.txt does not exist
    NotFound,
}

impl RobotsVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allowed => "Allowed",
            Self::Disallowed => "Disallowed",
            Self::FetchError => "robots.txt error",
            Self::NotFound => "robots.txt not found",
        }
    }
}

impl fmt::Display for RobotsVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RobotsVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Returns the robots.txt location for a page's origin
///
/// # Examples
///
/// ```
/// use seo_checker::robots::robots_url;
/// use url::Url;
///
/// let page = Url::parse("http://example.com:8080/a/b?c=d").unwrap();
/// assert_eq!(robots_url(&page), "http://example.com:8080/robots.txt");
/// ```
pub fn robots_url(page_url: &Url) -> String {
    match page_url.port() {
        Some(port) => format!(
            "{}://{}:{}/robots.txt",
            page_url.scheme(),
            page_url.host_str().unwrap_or_default(),
            port
        ),
        None => format!(
            "{}://{}/robots.txt",
            page_url.scheme(),
            page_url.host_str().unwrap_or_default()
        ),
    }
}

/// Percent-decodes the path of a URL
///
/// Byte sequences that are not valid UTF-8 become U+FFFD.
pub fn decoded_path(page_url: &Url) -> String {
    let bytes = urlencoding::decode_binary(page_url.path().as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Returns true if a robots.txt response means the file does not exist
fn is_not_found(status_code: u16, body: &str) -> bool {
    matches!(status_code, 404 | 410)
        || body
            .get(..3)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("404"))
}

/// Checks a page's crawl permission against its site's robots.txt
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `page_url` - The page whose permission is checked
/// * `policy` - Attempt budget for the robots.txt fetch
///
/// # Returns
///
/// * `FetchError` - robots.txt was unreachable after all attempts
/// * `NotFound` - status 404 or 410, or a body starting with "404"
/// * `Allowed` / `Disallowed` - the decoded page path evaluated against the
///   wildcard rules
pub async fn check_robots_policy(
    client: &Client,
    page_url: &Url,
    policy: &FetchPolicy,
) -> RobotsVerdict {
    let location = robots_url(page_url);

    let page = match fetch_with_retry(client, &location, policy).await {
        FetchResult::Success(page) | FetchResult::HttpError(page) => page,
        FetchResult::TransportError { error, attempts } => {
            tracing::debug!(
                "robots.txt at {} unreachable after {} attempts: {}",
                location,
                attempts,
                error
            );
            return RobotsVerdict::FetchError;
        }
    };

    if is_not_found(page.status_code, &page.body) {
        return RobotsVerdict::NotFound;
    }

    let rules = RobotsRuleSet::parse(&page.body);
    let verdict = rules.evaluate(&decoded_path(page_url));
    tracing::debug!("robots.txt verdict for {}: {}", page_url, verdict);
    verdict
}
