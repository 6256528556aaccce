//! Broken-link checking
//!
//! For every analyzed page the checker extracts the page's links, keeps
//! those on the page's own site or on an allow-listed external domain, and
//! probes them all concurrently.

mod probe;

pub use probe::{is_healthy_status, probe_link};

use crate::config::Config;
use crate::crawler::{build_http_client, extract_link_candidates, LinkCandidate};
use crate::url::{classify_link, normalize_host};
use futures::future::join_all;
use reqwest::Client;
use scraper::Html;
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

/// Sentinel shown when a page has no broken links
pub const NO_BROKEN_LINKS: &str = "Keine";

/// A link whose target did not respond healthily
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    pub url: String,
    pub anchor_text: String,
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.anchor_text.is_empty() {
            write!(f, "{} (Text: [kein Text])", self.url)
        } else {
            write!(f, "{} (Text: \"{}\")", self.url, self.anchor_text)
        }
    }
}

/// Outcome of the broken-link check of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokenLinkSummary {
    /// No link on the page was in scope
    NothingToCheck,
    /// Every in-scope link responded healthily
    AllHealthy,
    /// Dead links in page order
    Broken(Vec<BrokenLink>),
}

impl BrokenLinkSummary {
    pub fn has_broken(&self) -> bool {
        matches!(self, Self::Broken(links) if !links.is_empty())
    }

    pub fn broken_links(&self) -> &[BrokenLink] {
        match self {
            Self::Broken(links) => links,
            _ => &[],
        }
    }
}

impl fmt::Display for BrokenLinkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broken(links) if !links.is_empty() => {
                for (i, link) in links.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", link)?;
                }
                Ok(())
            }
            _ => f.write_str(NO_BROKEN_LINKS),
        }
    }
}

impl Serialize for BrokenLinkSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Probes the in-scope links of pages
#[derive(Debug, Clone)]
pub struct LinkChecker {
    client: Client,
    allow_list: Vec<String>,
}

impl LinkChecker {
    /// Builds a checker with its own client (link-checker User-Agent, probe timeout)
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(
            &config.user_agent.link_checker,
            config.links.probe_timeout(),
            config.fetch.accept_invalid_certs,
        )?;

        Ok(Self::with_client(
            client,
            &config.links.allowed_external_domains,
        ))
    }

    /// Builds a checker around an existing client
    pub fn with_client(client: Client, allowed_external_domains: &[String]) -> Self {
        let allow_list = allowed_external_domains
            .iter()
            .map(|domain| normalize_host(domain.trim()))
            .filter(|domain| !domain.is_empty())
            .collect();

        Self { client, allow_list }
    }

    /// Returns the links of a page that should be probed
    ///
    /// Synchronous so that the parsed document is dropped before any probe
    /// is awaited.
    pub fn candidates_in_scope(&self, html: &str, base_url: &Url) -> Vec<LinkCandidate> {
        let page_host = match base_url.host_str() {
            Some(host) => normalize_host(host),
            None => return Vec::new(),
        };

        let document = Html::parse_document(html);
        extract_link_candidates(&document, base_url)
            .into_iter()
            .filter(|candidate| {
                classify_link(&candidate.url, &page_host, &self.allow_list).should_check()
            })
            .collect()
    }

    /// Probes a set of links concurrently and returns the dead ones in input order
    pub async fn check_links(&self, candidates: Vec<LinkCandidate>) -> Vec<BrokenLink> {
        let probes = candidates.iter().map(|c| probe_link(&self.client, &c.url));
        let results = join_all(probes).await;

        candidates
            .into_iter()
            .zip(results)
            .filter(|(_, healthy)| !healthy)
            .map(|(candidate, _)| BrokenLink {
                url: candidate.url.to_string(),
                anchor_text: candidate.anchor_text,
            })
            .collect()
    }

    /// Finds the broken links of one page
    ///
    /// # Arguments
    ///
    /// * `html` - The page source
    /// * `base_url` - The URL links are resolved against (the final URL after redirects)
    pub async fn find_broken_links(&self, html: &str, base_url: &Url) -> BrokenLinkSummary {
        let candidates = self.candidates_in_scope(html, base_url);
        if candidates.is_empty() {
            return BrokenLinkSummary::NothingToCheck;
        }

        let total = candidates.len();
        let broken = self.check_links(candidates).await;
        tracing::debug!(
            "{}: {} of {} checked links broken",
            base_url,
            broken.len(),
            total
        );

        if broken.is_empty() {
            BrokenLinkSummary::AllHealthy
        } else {
            BrokenLinkSummary::Broken(broken)
        }
    }
}
