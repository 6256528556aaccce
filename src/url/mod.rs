//! URL handling module for SEO-Checker
//!
//! This module provides scheme normalization, host extraction, domain
//! matching, and the scope classification used by the broken-link checker.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, netloc, normalize_host, strip_www};
pub use matcher::matches_domain;
pub use normalize::{
    ensure_scheme, normalize_start_input, parse_target, strip_fragment_and_trailing_slash,
};

use ::url::Url;

/// Scope of a link relative to the page it appears on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkScope {
    /// Same host as the page (ignoring `www.`)
    SameSite,
    /// Host is an allow-listed external domain or one of its subdomains
    AllowListed,
    /// Anything else - never probed, never reported
    OutOfScope,
}

impl LinkScope {
    /// Returns true if links of this scope are probed for liveness
    pub fn should_check(&self) -> bool {
        matches!(self, Self::SameSite | Self::AllowListed)
    }
}

/// Classifies a link against the page's host and the external allow-list
///
/// # Arguments
///
/// * `link` - The resolved absolute link
/// * `page_host` - The page's host, normalized with [`normalize_host`]
/// * `allow_list` - Additional external domains, normalized with [`normalize_host`]
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_checker::url::{classify_link, LinkScope};
///
/// let allow = vec!["youtube.com".to_string()];
/// let link = Url::parse("https://www.example.com/about").unwrap();
/// assert_eq!(classify_link(&link, "example.com", &allow), LinkScope::SameSite);
///
/// let link = Url::parse("https://m.youtube.com/watch").unwrap();
/// assert_eq!(classify_link(&link, "example.com", &allow), LinkScope::AllowListed);
///
/// let link = Url::parse("https://other.org/").unwrap();
/// assert_eq!(classify_link(&link, "example.com", &allow), LinkScope::OutOfScope);
/// ```
pub fn classify_link(link: &Url, page_host: &str, allow_list: &[String]) -> LinkScope {
    let host = match link.host_str() {
        Some(h) => normalize_host(h),
        None => return LinkScope::OutOfScope,
    };

    if host == page_host {
        return LinkScope::SameSite;
    }

    if allow_list
        .iter()
        .any(|domain| matches_domain(domain, &host))
    {
        return LinkScope::AllowListed;
    }

    LinkScope::OutOfScope
}
