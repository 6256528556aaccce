//! Domain spider
//!
//! Discovers the internal pages of one site by following links from its
//! start page until the frontier is exhausted or the page budget is spent.
//!
//! Two host comparisons are in play and they differ on purpose:
//! - a link is followed when its host matches the start host with `www.`
//!   stripped from both
//! - a fetched page is reported only when its host matches the start host
//!   exactly
//!
//! Starting from `www.example.com`, pages on `example.com` are fetched and
//! their links followed, but they are not part of the result.

use crate::config::Config;
use crate::crawler::extract_spider_links;
use crate::state::Frontier;
use crate::url::{netloc, normalize_start_input, strip_www};
use crate::{CheckerError, UrlError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};
use scraper::Html;
use std::collections::BTreeSet;
use std::time::Duration;
use url::Url;

/// Breadth-first crawler for a single site
#[derive(Debug, Clone)]
pub struct Spider {
    client: Client,
    resolve_timeout: Duration,
    fetch_timeout: Duration,
}

impl Spider {
    /// Creates a spider with its own client (spider User-Agent, pooled per host)
    pub fn new(config: &Config) -> crate::Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent.spider)
            .redirect(Policy::limited(10))
            .pool_max_idle_per_host(config.spider.max_connections_per_host as usize)
            .danger_accept_invalid_certs(config.fetch.accept_invalid_certs)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Builds a spider around an existing client, taking only timeouts from `config`
    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            resolve_timeout: Duration::from_secs(config.spider.resolve_timeout_secs),
            fetch_timeout: Duration::from_secs(config.spider.fetch_timeout_secs),
        }
    }

    /// Crawls a site and returns its internal page URLs
    ///
    /// # Algorithm
    ///
    /// 1. Normalize the start input and follow its redirects once to find
    ///    the canonical start URL
    /// 2. Seed the frontier with `{scheme}://{host[:port]}` of that URL
    /// 3. Until the frontier is empty or `max_urls` pages were visited, pop a
    ///    URL, fetch it, and for HTML pages enqueue every same-site link
    ///
    /// # Arguments
    ///
    /// * `start_input` - A domain or URL, e.g. `example.com`
    /// * `max_urls` - Page budget (at least 1)
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Sorted URLs of HTML pages on the exact start host
    /// * `Err(CheckerError)` - Zero budget or an unusable start input
    pub async fn crawl_domain(
        &self,
        start_input: &str,
        max_urls: usize,
    ) -> crate::Result<Vec<String>> {
        if max_urls == 0 {
            return Err(CheckerError::InvalidInput(
                "page budget must be at least 1".to_string(),
            ));
        }

        let original_start = normalize_start_input(start_input);
        let start_url = self.resolve_redirect(&original_start).await;
        let start = Url::parse(&start_url)?;

        let exact_host = netloc(&start).ok_or(UrlError::MissingDomain)?;
        let base_host = strip_www(&exact_host).to_string();
        let seed = format!("{}://{}", start.scheme(), exact_host);

        tracing::info!(
            "Spidering {} (budget {} pages, following links on {})",
            seed,
            max_urls,
            base_host
        );

        let mut frontier = Frontier::new(seed, max_urls);
        let mut internal_urls: BTreeSet<String> = BTreeSet::new();

        while frontier.has_pending() {
            let url = match frontier.pop() {
                Some(url) => url,
                None => break,
            };
            if !frontier.mark_visited(&url) {
                continue;
            }

            let page_url = match Url::parse(&url) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::debug!("Skipping unparseable URL {}: {}", url, e);
                    continue;
                }
            };

            let html = match self.fetch_html(&url).await {
                Some(html) => html,
                None => continue,
            };

            if is_internal(&page_url, &exact_host) {
                internal_urls.insert(url.clone());
            }

            let links = {
                let document = Html::parse_document(&html);
                extract_spider_links(&document, &page_url)
            };

            for link in links {
                if in_crawl_scope(&link, &base_host) {
                    frontier.try_enqueue(link);
                }
            }

            tracing::debug!(
                "Visited {} ({} visited, {} pending)",
                url,
                frontier.visited_len(),
                frontier.pending_len()
            );
        }

        tracing::info!(
            "Spider finished: {} pages visited, {} internal URLs found",
            frontier.visited_len(),
            internal_urls.len()
        );

        Ok(internal_urls.into_iter().collect())
    }

    /// Follows redirects from the start URL; falls back to the input on any failure
    async fn resolve_redirect(&self, url: &str) -> String {
        match self
            .client
            .get(url)
            .timeout(self.resolve_timeout)
            .send()
            .await
        {
            Ok(response) => response.url().to_string(),
            Err(e) => {
                tracing::warn!("Could not resolve {}: {}", url, e);
                url.to_string()
            }
        }
    }

    /// Fetches a page and returns its body only for a 200 HTML response
    async fn fetch_html(&self, url: &str) -> Option<String> {
        let response = match self
            .client
            .get(url)
            .timeout(self.fetch_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Fetch failed for {}: {}", url, e);
                return None;
            }
        };

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("text/html"));

        if response.status().as_u16() != 200 || !is_html {
            tracing::debug!(
                "Not expanding {} (status {}, html: {})",
                url,
                response.status(),
                is_html
            );
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("Failed to read body of {}: {}", url, e);
                None
            }
        }
    }
}

/// Returns true if a page belongs to the result set: same host and port as the start
pub fn is_internal(url: &Url, exact_host: &str) -> bool {
    netloc(url).is_some_and(|host| host == exact_host)
}

/// Returns true if the spider may follow a link
///
/// The link's host and port, with `www.` removed, must equal `base_host`.
pub fn in_crawl_scope(link: &str, base_host: &str) -> bool {
    Url::parse(link)
        .ok()
        .and_then(|url| netloc(&url))
        .is_some_and(|host| strip_www(&host) == base_host)
}
