use reqwest::{Client, Method};
use url::Url;

/// Returns true if a status code means the link target is alive
///
/// Success and redirect statuses count, and so does 429: a rate-limited
/// target exists.
pub fn is_healthy_status(status_code: u16) -> bool {
    (200..400).contains(&status_code) || status_code == 429
}

/// Probes one link for liveness
///
/// Sends a HEAD request first. If it errors or returns an unhealthy status,
/// a single GET is tried with the same criteria. The link is dead only when
/// both requests fail.
pub async fn probe_link(client: &Client, url: &Url) -> bool {
    for method in [Method::HEAD, Method::GET] {
        match client.request(method.clone(), url.clone()).send().await {
            Ok(response) if is_healthy_status(response.status().as_u16()) => return true,
            Ok(response) => {
                tracing::debug!("{} {} returned {}", method, url, response.status());
            }
            Err(e) => {
                tracing::debug!("{} {} failed: {}", method, url, e);
            }
        }
    }

    false
}
