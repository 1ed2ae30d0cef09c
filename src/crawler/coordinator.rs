//! Crawler coordinator - level-by-level crawl orchestration
//!
//! This module contains the main crawl loop. A crawl proceeds in levels:
//! - Drain the pending queue, probing and fetching every claimed URL
//! - Stage the links found on each page while depth remains
//! - Once the level has fully drained, merge the staged links into the
//!   pending queue and decrement the remaining depth
//! - Stop when the pending queue comes up empty
//!
//! A level is drained either sequentially or by a pool of worker tasks. The
//! pool is created fresh for every level and joined before the level closes,
//! so no worker from level N is still running when level N+1 starts claiming.

use crate::config::{default_concurrency, CrawlMode, CrawlerConfig, DEFAULT_PROBE_TIMEOUT_MS};
use crate::crawler::discovery::discover_links;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::{Frontier, PageSummary};
use crate::output::{CrawlCounters, CrawlStatistics};
use crate::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Settings for a single crawl invocation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Number of link-discovery levels beyond the seeds
    pub depth: u32,

    pub mode: CrawlMode,

    /// Worker count for concurrent mode; host parallelism when `None`
    pub concurrency: Option<usize>,

    /// Timeout handed to the availability probe
    pub probe_timeout: Duration,
}

impl CrawlOptions {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            depth: config.depth,
            mode: config.mode,
            concurrency: config.concurrency,
            probe_timeout: config.probe_timeout(),
        }
    }

    /// Worker pool size for concurrent mode, never zero
    pub fn workers(&self) -> usize {
        self.concurrency.unwrap_or_else(default_concurrency).max(1)
    }
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            depth: 0,
            mode: CrawlMode::default(),
            concurrency: None,
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
        }
    }
}

/// Outcome of a crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Summaries in completion order
    pub pages: Vec<PageSummary>,

    pub stats: CrawlStatistics,
}

/// Main crawler coordinator structure
///
/// Owns the frontier for exactly one crawl; [`Coordinator::run`] consumes it.
pub struct Coordinator<F> {
    fetcher: Arc<F>,
    frontier: Arc<Frontier>,
    counters: Arc<CrawlCounters>,
    options: CrawlOptions,
}

impl<F: PageFetcher + 'static> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of pages
    /// * `seeds` - Initial URLs, crawled in the given order
    /// * `options` - Depth, mode and timeouts for this crawl
    pub fn new(fetcher: F, seeds: Vec<String>, options: CrawlOptions) -> Self {
        Self::with_shared_fetcher(Arc::new(fetcher), seeds, options)
    }

    /// Creates a coordinator around a fetcher the caller keeps a handle to
    pub fn with_shared_fetcher(fetcher: Arc<F>, seeds: Vec<String>, options: CrawlOptions) -> Self {
        Self {
            fetcher,
            frontier: Arc::new(Frontier::new(seeds, options.depth)),
            counters: Arc::new(CrawlCounters::new()),
            options,
        }
    }

    /// Runs the crawl to completion
    ///
    /// Per-URL failures never abort the crawl; the report holds whatever
    /// summaries were collected, possibly none. The only error is a worker
    /// task that panicked or was cancelled.
    pub async fn run(self) -> Result<CrawlReport> {
        let start_time = Instant::now();

        tracing::info!(
            "Starting {} crawl: {} seed(s), depth {}",
            self.options.mode,
            self.frontier.pending_len(),
            self.options.depth
        );

        let mut level = 0u32;
        loop {
            let discovering = self.frontier.is_discovering();
            tracing::info!(
                "Level {}: {} URL(s) pending, {} depth remaining",
                level,
                self.frontier.pending_len(),
                self.frontier.depth_remaining()
            );

            match self.options.mode {
                CrawlMode::Sequential => self.drain_sequential(discovering).await,
                CrawlMode::Concurrent => self.drain_concurrent(discovering).await?,
            }
            self.counters.level_completed();

            tracing::debug!(
                "Level {} drained: {} link(s) staged",
                level,
                self.frontier.staged_len()
            );

            if !self.frontier.advance_level() {
                break;
            }
            level += 1;
        }

        let pages = self.frontier.take_results();
        let stats = self.counters.snapshot(start_time.elapsed());

        tracing::info!(
            "Crawl completed: {} page(s) collected from {} URL(s) in {:?}",
            pages.len(),
            stats.urls_claimed,
            stats.elapsed
        );

        Ok(CrawlReport { pages, stats })
    }

    async fn drain_sequential(&self, discovering: bool) {
        while let Some(url) = self.frontier.claim_next() {
            process_url(
                self.fetcher.as_ref(),
                &self.frontier,
                &self.counters,
                self.options.probe_timeout,
                &url,
                discovering,
            )
            .await;
        }
    }

    async fn drain_concurrent(&self, discovering: bool) -> Result<()> {
        let workers = self.options.workers();
        let mut pool = JoinSet::new();

        for worker_id in 0..workers {
            let fetcher = Arc::clone(&self.fetcher);
            let frontier = Arc::clone(&self.frontier);
            let counters = Arc::clone(&self.counters);
            let probe_timeout = self.options.probe_timeout;

            pool.spawn(async move {
                let mut handled = 0usize;
                while let Some(url) = frontier.claim_next() {
                    process_url(
                        fetcher.as_ref(),
                        &frontier,
                        &counters,
                        probe_timeout,
                        &url,
                        discovering,
                    )
                    .await;
                    handled += 1;
                }
                tracing::trace!("Worker {} idle after {} URL(s)", worker_id, handled);
            });
        }

        // Join every worker before reporting, even if one of them failed
        let mut failure = None;
        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Crawl worker failed: {}", e);
                failure.get_or_insert(e);
            }
        }

        match failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

/// Probes, fetches and summarizes one claimed URL
///
/// Unreachable URLs and fetch failures are counted and logged, never
/// returned: they drop out of the crawl without a summary or staged links.
async fn process_url<F>(
    fetcher: &F,
    frontier: &Frontier,
    counters: &CrawlCounters,
    probe_timeout: Duration,
    url: &str,
    discovering: bool,
) where
    F: PageFetcher + ?Sized,
{
    counters.url_claimed();
    tracing::debug!("Processing URL: {}", url);

    if !fetcher.probe(url, probe_timeout).await {
        counters.unreachable();
        tracing::debug!("Skipping unreachable URL: {}", url);
        return;
    }

    let document = match fetcher.fetch(url).await {
        Ok(document) => document,
        Err(e) => {
            counters.fetch_failed();
            tracing::warn!("Failed to fetch {}: {}", url, e);
            return;
        }
    };

    if discovering {
        let links = discover_links(&document, url);
        let staged = frontier.stage_discovered(links);
        counters.links_staged(staged);
        tracing::trace!("Staged {} link(s) from {}", staged, url);
    }

    frontier.record_result(PageSummary::from_document(document, url));
    counters.page_collected();
}
