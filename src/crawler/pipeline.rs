//! Analysis pipeline - per-URL orchestration
//!
//! Each URL goes through the same steps:
//! - Scheme normalization
//! - The primary fetch, inside the concurrency gate
//! - Page analysis of the fetched HTML
//! - The robots.txt check and broken-link probes, outside the gate
//!
//! A failing URL produces an error record and never affects its siblings.

use crate::analysis::analyze_page;
use crate::config::{validate, Config};
use crate::crawler::{
    build_http_client, fetch_with_retry, ConcurrencyGate, FetchPolicy, FetchResult,
};
use crate::links::LinkChecker;
use crate::output::PageRecord;
use crate::robots::check_robots_policy;
use crate::url::{ensure_scheme, parse_target};
use futures::future::join_all;
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Analyzes pages and produces one `PageRecord` per URL
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Arc<Config>,
    client: Client,
    link_checker: LinkChecker,
    gate: ConcurrencyGate,
    page_policy: FetchPolicy,
    robots_policy: FetchPolicy,
}

impl Pipeline {
    /// Creates a pipeline
    ///
    /// # Arguments
    ///
    /// * `config` - The checker configuration; validated before anything is built
    ///
    /// # Returns
    ///
    /// * `Ok(Pipeline)` - Ready to analyze
    /// * `Err(CheckerError)` - Invalid configuration or HTTP client setup failure
    pub fn new(config: Config) -> crate::Result<Self> {
        validate(&config)?;

        let client = build_http_client(
            &config.user_agent.analyzer,
            config.fetch.timeout(),
            config.fetch.accept_invalid_certs,
        )?;
        let link_checker = LinkChecker::new(&config)?;
        let gate = ConcurrencyGate::new(config.crawler.concurrency as usize);
        let page_policy = FetchPolicy::pages(&config.fetch);
        let robots_policy = FetchPolicy::robots(&config.fetch);

        if config.fetch.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled");
        }

        Ok(Self {
            config: Arc::new(config),
            client,
            link_checker,
            gate,
            page_policy,
            robots_policy,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    /// Analyzes a single URL
    ///
    /// Scheme-less input gets `https://`. The gate is held only for the
    /// primary fetch. If that fetch fails after all attempts, the record
    /// carries just the URL and the error.
    pub async fn analyze(&self, input: &str) -> PageRecord {
        let target = ensure_scheme(input);

        let page_url = match parse_target(&target) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", target, e);
                return PageRecord::fetch_error(target, e.to_string());
            }
        };

        tracing::debug!("Fetching {}", target);
        let fetched = self
            .gate
            .run(fetch_with_retry(&self.client, &target, &self.page_policy))
            .await;

        let page = match fetched {
            FetchResult::Success(page) | FetchResult::HttpError(page) => page,
            FetchResult::TransportError { error, attempts } => {
                tracing::warn!(
                    "Giving up on {} after {} attempts: {}",
                    target,
                    attempts,
                    error
                );
                return PageRecord::fetch_error(target, error);
            }
        };

        let analysis = analyze_page(&page.body, &page.headers, &target);

        let robots_policy =
            check_robots_policy(&self.client, &page_url, &self.robots_policy).await;

        let base_url = Url::parse(&page.final_url).unwrap_or_else(|_| page_url.clone());
        let broken_links = self
            .link_checker
            .find_broken_links(&page.body, &base_url)
            .await;

        PageRecord::analyzed(
            target,
            page.status_code,
            analysis,
            robots_policy,
            broken_links,
        )
    }

    /// Analyzes a batch of URLs concurrently
    ///
    /// Records come back in input order. The gate bounds how many primary
    /// fetches are in flight at once.
    pub async fn analyze_all(&self, urls: &[String]) -> Vec<PageRecord> {
        let total = urls.len();
        let completed = AtomicUsize::new(0);
        let start_time = Instant::now();

        tracing::info!(
            "Analyzing {} URLs with concurrency {}",
            total,
            self.gate.capacity()
        );

        let tasks = urls.iter().map(|url| {
            let completed = &completed;
            async move {
                let record = self.analyze(url).await;
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::info!(
                    "Progress: {}/{} {} [{}]",
                    done,
                    total,
                    record.url,
                    record.status
                );
                record
            }
        });

        let records = join_all(tasks).await;

        tracing::info!(
            "Analysis completed: {} pages in {:?}",
            records.len(),
            start_time.elapsed()
        );

        records
    }
}

/// Runs a complete analysis of a URL list
///
/// # Example
///
/// ```no_run
/// use seo_checker::{crawler::run_analysis, Config};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let urls = vec!["example.com".to_string()];
/// let records = run_analysis(Config::default(), &urls).await?;
/// println!("{}", records[0].status);
/// # Ok(())
/// # }
/// ```
pub async fn run_analysis(config: Config, urls: &[String]) -> crate::Result<Vec<PageRecord>> {
    let pipeline = Pipeline::new(config)?;
    Ok(pipeline.analyze_all(urls).await)
}
