use crate::config::types::{Config, CrawlerConfig, FetchConfig, LinksConfig, SpiderConfig};
use crate::{ConfigError, ConfigResult};

/// Validates the entire configuration
///
/// Runs before any network work starts; a configuration that fails here is
/// the only fatal condition of a crawl.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    validate_links_config(&config.links)?;
    validate_spider_config(&config.spider)?;
    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    if config.concurrency < 1 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be >= 1, got {}",
            config.concurrency
        )));
    }

    if config.max_urls < 1 {
        return Err(ConfigError::Validation(format!(
            "max_urls must be >= 1, got {}",
            config.max_urls
        )));
    }

    Ok(())
}

/// Upper bound for `backoff-secs`; the sleep after attempt `n` is `backoff * n`
const MAX_BACKOFF_SECS: f64 = 3600.0;

fn validate_fetch_config(config: &FetchConfig) -> ConfigResult<()> {
    if config.attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "attempts must be >= 1, got {}",
            config.attempts
        )));
    }

    if config.robots_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "robots_attempts must be >= 1, got {}",
            config.robots_attempts
        )));
    }

    if !(0.0..=MAX_BACKOFF_SECS).contains(&config.backoff_secs) {
        return Err(ConfigError::Validation(format!(
            "backoff_secs must be between 0 and {}, got {}",
            MAX_BACKOFF_SECS, config.backoff_secs
        )));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be > 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_links_config(config: &LinksConfig) -> ConfigResult<()> {
    if config.probe_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "probe_timeout_secs must be > 0".to_string(),
        ));
    }

    for domain in &config.allowed_external_domains {
        validate_domain_string(domain)?;
    }

    Ok(())
}

fn validate_spider_config(config: &SpiderConfig) -> ConfigResult<()> {
    if config.fetch_timeout_secs == 0 || config.resolve_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "spider timeouts must be > 0".to_string(),
        ));
    }

    if config.max_connections_per_host < 1 {
        return Err(ConfigError::Validation(format!(
            "max_connections_per_host must be >= 1, got {}",
            config.max_connections_per_host
        )));
    }

    Ok(())
}

/// Validates an allow-list host name
fn validate_domain_string(domain: &str) -> ConfigResult<()> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_zero_page_budget() {
        let mut config = Config::default();
        config.crawler.max_urls = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let mut config = Config::default();
        config.fetch.robots_attempts = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_negative_backoff() {
        let mut config = Config::default();
        config.fetch.backoff_secs = -1.0;
        assert!(validate(&config).is_err());

        config.fetch.backoff_secs = f64::NAN;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_huge_backoff() {
        let mut config = Config::default();
        config.fetch.backoff_secs = 1e30;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));

        config.fetch.backoff_secs = f64::INFINITY;
        assert!(validate(&config).is_err());

        config.fetch.backoff_secs = MAX_BACKOFF_SECS;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_backoff_is_allowed() {
        let mut config = Config::default();
        config.fetch.backoff_secs = 0.0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_domain_string() {
        assert!(validate_domain_string("example.com").is_ok());
        assert!(validate_domain_string("sub.example.com").is_ok());

        assert!(validate_domain_string("").is_err());
        assert!(validate_domain_string("example").is_err());
        assert!(validate_domain_string(".example.com").is_err());
        assert!(validate_domain_string("example.com.").is_err());
        assert!(validate_domain_string("exa mple.com").is_err());
        assert!(validate_domain_string("a..b.com").is_err());
    }

    #[test]
    fn test_rejects_bad_allow_list_entry() {
        let mut config = Config::default();
        config.links.allowed_external_domains = vec!["*.example.com".to_string()];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidPattern(_))
        ));
    }
}
