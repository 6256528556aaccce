/// Checks if a host is an allow-listed domain or one of its subdomains
///
/// Both arguments must already be normalized (lowercase, no `www.`).
///
/// # Arguments
///
/// * `domain` - The allow-listed domain, e.g. "youtube.com"
/// * `candidate` - The host to check
///
/// # Examples
///
/// ```
/// use seo_checker::url::matches_domain;
///
/// assert!(matches_domain("example.com", "example.com"));
/// assert!(matches_domain("example.com", "blog.example.com"));
/// assert!(matches_domain("example.com", "api.v2.example.com"));
/// assert!(!matches_domain("example.com", "myexample.com"));
/// assert!(!matches_domain("example.com", "example.org"));
/// ```
pub fn matches_domain(domain: &str, candidate: &str) -> bool {
    if domain.is_empty() {
        return false;
    }
    candidate == domain || candidate.ends_with(&format!(".{}", domain))
}
