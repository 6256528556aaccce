use crate::{UrlError, UrlResult};
use url::Url;

/// Prepends `https://` to a URL that carries no HTTP(S) scheme
///
/// Used for every crawl target before it is fetched. Leading and trailing
/// whitespace is removed; nothing else about the URL is changed.
///
/// # Examples
///
/// ```
/// use seo_checker::url::ensure_scheme;
///
/// assert_eq!(ensure_scheme("example.com/page"), "https://example.com/page");
/// assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
/// ```
pub fn ensure_scheme(input: &str) -> String {
    let input = input.trim();
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

/// Parses a crawl target into an HTTP(S) URL
///
/// # Returns
///
/// * `Ok(Url)` - A URL with an http or https scheme and a host
/// * `Err(UrlError)` - The input could not be parsed or is not HTTP(S)
pub fn parse_target(input: &str) -> UrlResult<Url> {
    let url = Url::parse(&ensure_scheme(input)).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Normalizes the start input given to the domain spider
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace and lowercase
/// 2. Prepend `https://` unless the input already starts with `http`
/// 3. Remove trailing slashes
///
/// # Examples
///
/// ```
/// use seo_checker::url::normalize_start_input;
///
/// assert_eq!(normalize_start_input(" WWW.Example.com/ "), "https://www.example.com");
/// assert_eq!(normalize_start_input("http://example.com"), "http://example.com");
/// ```
pub fn normalize_start_input(input: &str) -> String {
    let input = input.trim().to_lowercase();
    let with_scheme = if input.starts_with("http") {
        input
    } else {
        format!("https://{}", input)
    };
    with_scheme.trim_end_matches('/').to_string()
}

/// Renders a URL without its fragment and without trailing slashes
///
/// This is the canonical string form of every URL placed in the spider's
/// frontier, so that `/page`, `/page/` and `/page#top` are one entry.
pub fn strip_fragment_and_trailing_slash(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.as_str().trim_end_matches('/').to_string()
}
