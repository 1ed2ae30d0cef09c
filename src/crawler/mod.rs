//! Crawler module for breadth-limited crawling
//!
//! This module contains the core crawling logic, including:
//! - The frontier: pending queue, visited set and staged discoveries
//! - Level-by-level coordination in sequential or worker-pool mode
//! - HTTP probing and fetching behind the `PageFetcher` trait
//! - HTML extraction and link discovery

mod coordinator;
mod discovery;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{Coordinator, CrawlOptions, CrawlReport};
pub use discovery::discover_links;
pub use fetcher::{
    build_http_client, check_availability, fetch_document, HttpFetcher, PageFetcher,
};
pub use frontier::{merge_queues, Frontier, PageSummary};
pub use parser::{parse_document, Document};

use crate::config::{validate, Config, CrawlMode, CrawlerConfig};
use crate::Result;

/// Crawls from `seeds` and returns the collected page summaries
///
/// This is the plain crawl invocation: default user agent and timeouts, real
/// HTTP. Unreachable or failing pages are left out of the result rather than
/// reported as errors.
///
/// # Arguments
///
/// * `seeds` - Absolute HTTP(S) URLs to start from
/// * `depth` - Link-discovery levels beyond the seeds; 0 fetches the seeds only
/// * `mode` - Sequential or concurrent draining of each level
/// * `concurrency` - Worker count for concurrent mode; host parallelism if `None`
///
/// # Example
///
/// ```no_run
/// use breakpoint_crawler::crawler::crawl;
/// use breakpoint_crawler::CrawlMode;
///
/// # async fn example() -> breakpoint_crawler::Result<()> {
/// let pages = crawl(vec!["https://example.com/".to_string()], 1, CrawlMode::Concurrent, None).await?;
/// for page in pages {
///     println!("{} - {}", page.url, page.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    seeds: Vec<String>,
    depth: u32,
    mode: CrawlMode,
    concurrency: Option<usize>,
) -> Result<Vec<PageSummary>> {
    let config = Config {
        seeds,
        crawler: CrawlerConfig {
            depth,
            mode,
            concurrency,
            ..CrawlerConfig::default()
        },
        ..Config::default()
    };

    Ok(run_crawl(&config).await?.pages)
}

/// Runs a crawl described by a configuration
///
/// The configuration is validated first; an invalid seed or setting is the
/// only way this fails before any request is made.
pub async fn run_crawl(config: &Config) -> Result<CrawlReport> {
    validate(config)?;

    let fetcher = HttpFetcher::new(&config.user_agent, config.crawler.request_timeout())?;
    let options = CrawlOptions::from_config(&config.crawler);

    Coordinator::new(fetcher, config.seeds.clone(), options)
        .run()
        .await
}
