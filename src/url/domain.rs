use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_checker::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the network location of a URL: host plus an explicit port
///
/// The spider compares pages by network location, so two servers on the
/// same host but different ports are different sites.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_checker::url::netloc;
///
/// let url = Url::parse("http://127.0.0.1:8080/a").unwrap();
/// assert_eq!(netloc(&url), Some("127.0.0.1:8080".to_string()));
///
/// let url = Url::parse("https://example.com:443/a").unwrap();
/// assert_eq!(netloc(&url), Some("example.com".to_string()));
/// ```
pub fn netloc(url: &Url) -> Option<String> {
    let host = extract_domain(url)?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// Removes a leading `www.` label
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Lowercases a host and removes a leading `www.` label
///
/// # Examples
///
/// ```
/// use seo_checker::url::normalize_host;
///
/// assert_eq!(normalize_host("WWW.Example.com"), "example.com");
/// assert_eq!(normalize_host("blog.example.com"), "blog.example.com");
/// ```
pub fn normalize_host(host: &str) -> String {
    strip_www(&host.to_lowercase()).to_string()
}
