use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for SEO-Checker
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetch: FetchConfig,
    pub links: LinksConfig,
    pub spider: SpiderConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawl-wide limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of simultaneous primary page fetches
    pub concurrency: u32,

    /// Page budget for the domain spider
    pub max_urls: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            concurrency: 20,
            max_urls: 100,
        }
    }
}

/// Retry and timeout settings for page and robots.txt fetches
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// Total attempts for a page fetch
    pub attempts: u32,

    /// Total attempts for a robots.txt fetch
    pub robots_attempts: u32,

    /// Linear backoff multiplier in seconds (sleep = backoff * attempt)
    pub backoff_secs: f64,

    /// Per-attempt timeout in seconds
    pub timeout_secs: u64,

    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            robots_attempts: 2,
            backoff_secs: 1.5,
            timeout_secs: 25,
            accept_invalid_certs: false,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Backoff as a duration; values validation would reject count as zero
    pub fn backoff(&self) -> Duration {
        Duration::try_from_secs_f64(self.backoff_secs).unwrap_or(Duration::ZERO)
    }
}

/// Broken-link checker settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LinksConfig {
    /// Timeout for each HEAD/GET liveness probe in seconds
    pub probe_timeout_secs: u64,

    /// External hosts (and their subdomains) whose links are checked too
    pub allowed_external_domains: Vec<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: 10,
            allowed_external_domains: Vec::new(),
        }
    }
}

impl LinksConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Domain spider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SpiderConfig {
    /// Timeout for each page fetched during traversal, in seconds
    pub fetch_timeout_secs: u64,

    /// Timeout for the initial redirect resolution, in seconds
    pub resolve_timeout_secs: u64,

    /// Connection cap per host
    pub max_connections_per_host: u32,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 20,
            resolve_timeout_secs: 10,
            max_connections_per_host: 10,
        }
    }
}

/// User-Agent strings sent by each component
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Sent with page, robots.txt and sitemap fetches
    pub analyzer: String,

    /// Sent by the domain spider
    pub spider: String,

    /// Sent with HEAD/GET liveness probes
    pub link_checker: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            analyzer: "SEOChecker/1.0 (+https://example.com/bot)".to_string(),
            spider: "Mozilla/5.0 (compatible; SEOChecker/1.0; +https://example.com/bot)"
                .to_string(),
            link_checker: "SEOChecker-LinkCheck/1.0 (+https://example.com/bot)".to_string(),
        }
    }
}
