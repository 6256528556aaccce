//! Configuration module for SEO-Checker
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not an error at this level: callers fall back to
//! [`Config::default`] and run [`validate`] on the result.
//!
//! # Example
//!
//! ```no_run
//! use seo_checker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seo-checker.toml")).unwrap();
//! println!("Concurrency: {}", config.crawler.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FetchConfig, LinksConfig, SpiderConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
