//! SEO-Checker main entry point
//!
//! This is the command-line interface for the SEO-Checker crawler.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use seo_checker::config::{load_config_with_hash, validate, Config};
use seo_checker::crawler::{build_http_client, FetchPolicy, Pipeline, Spider};
use seo_checker::input::{load_sitemap, read_url_list};
use seo_checker::output::{write_report, OutputFormat, Report, ReportHeader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SEO-Checker: an asynchronous SEO crawler
///
/// SEO-Checker analyzes pages for indexability, title, meta description,
/// headings, word count and CMS, checks each page against its site's
/// robots.txt, and reports broken links.
#[derive(Parser, Debug)]
#[command(name = "seo-checker")]
#[command(version = "1.0.0")]
#[command(about = "An asynchronous SEO crawler", long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "crawl", "sitemap"])))]
struct Cli {
    /// File with one URL per line
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Discover URLs by spidering this domain
    #[arg(long, value_name = "URL")]
    crawl: Option<String>,

    /// Load URLs from this XML sitemap (.xml or .xml.gz)
    #[arg(long, value_name = "URL")]
    sitemap: Option<String>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum simultaneous page fetches
    #[arg(long)]
    concurrency: Option<u32>,

    /// Page budget for the spider
    #[arg(long)]
    max_urls: Option<u32>,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Resolve and print the URL list without analyzing it
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_configuration(&cli)?;

    let (source, urls) = collect_urls(&cli, &config).await?;

    if cli.dry_run {
        handle_dry_run(&config, &source, &urls);
        return Ok(());
    }

    handle_analysis(&cli, config, config_hash, source, urls).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so a report on stdout stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_checker=info,warn"),
            1 => EnvFilter::new("seo_checker=debug,info"),
            2 => EnvFilter::new("seo_checker=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (or defaults) and applies command-line overrides
fn load_configuration(cli: &Cli) -> Result<(Config, Option<String>)> {
    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = concurrency;
    }
    if let Some(max_urls) = cli.max_urls {
        config.crawler.max_urls = max_urls;
    }
    if cli.insecure {
        config.fetch.accept_invalid_certs = true;
    }

    validate(&config).context("Invalid configuration")?;

    Ok((config, config_hash))
}

/// Resolves the URL list from whichever source was given
async fn collect_urls(cli: &Cli, config: &Config) -> Result<(String, Vec<String>)> {
    if let Some(path) = &cli.input {
        let urls = read_url_list(path)
            .with_context(|| format!("Failed to read URL list {}", path.display()))?;
        return Ok((path.display().to_string(), urls));
    }

    if let Some(domain) = &cli.crawl {
        let spider = Spider::new(config).context("Failed to build spider client")?;
        let urls = spider
            .crawl_domain(domain, config.crawler.max_urls as usize)
            .await
            .with_context(|| format!("Failed to spider {}", domain))?;
        return Ok((domain.clone(), urls));
    }

    if let Some(sitemap_url) = &cli.sitemap {
        let client = build_http_client(
            &config.user_agent.analyzer,
            config.fetch.timeout(),
            config.fetch.accept_invalid_certs,
        )
        .context("Failed to build HTTP client")?;
        let urls = load_sitemap(&client, sitemap_url, &FetchPolicy::pages(&config.fetch)).await;
        return Ok((sitemap_url.clone(), urls));
    }

    anyhow::bail!("one of --input, --crawl or --sitemap is required")
}

/// Handles the --dry-run mode: shows what would be analyzed
fn handle_dry_run(config: &Config, source: &str, urls: &[String]) {
    println!("=== SEO-Checker Dry Run ===\n");

    println!("Configuration:");
    println!("  Concurrency: {}", config.crawler.concurrency);
    println!("  Page budget: {}", config.crawler.max_urls);
    println!(
        "  Fetch attempts: {} (robots.txt: {})",
        config.fetch.attempts, config.fetch.robots_attempts
    );
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  TLS verification: {}", !config.fetch.accept_invalid_certs);

    println!(
        "\nAllowed External Domains ({}):",
        config.links.allowed_external_domains.len()
    );
    for domain in &config.links.allowed_external_domains {
        println!("  - {}", domain);
    }

    println!("\nURLs from {} ({}):", source, urls.len());
    for url in urls {
        println!("  {}", url);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would analyze {} URLs", urls.len());
}

/// Handles the main analysis run
async fn handle_analysis(
    cli: &Cli,
    config: Config,
    config_hash: Option<String>,
    source: String,
    urls: Vec<String>,
) -> Result<()> {
    if urls.is_empty() {
        tracing::warn!("No URLs to analyze from {}", source);
    }

    let pipeline = Pipeline::new(config).context("Failed to set up analysis pipeline")?;
    let records = pipeline.analyze_all(&urls).await;

    let report = Report::new(ReportHeader::new(source, config_hash), records);
    tracing::info!(
        "{} pages analyzed, {} fetch errors, {} with broken links",
        report.summary.total_pages,
        report.summary.fetch_errors,
        report.summary.pages_with_broken_links
    );

    write_report(&report, cli.format, cli.output.as_deref()).context("Failed to write report")?;

    Ok(())
}
