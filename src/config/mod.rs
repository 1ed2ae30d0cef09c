//! Configuration module for the crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing values fall back to the defaults of
//! [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use breakpoint_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawler will follow links {} levels deep", config.crawler.depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_concurrency, Config, CrawlMode, CrawlerConfig, UserAgentConfig,
    DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, validate_seeds};
