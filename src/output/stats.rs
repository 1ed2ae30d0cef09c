//! Crawl statistics
//!
//! Workers bump a shared set of atomic counters while a crawl runs; the
//! coordinator turns them into a [`CrawlStatistics`] snapshot at the end.

use serde::Serialize;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStatistics {
    /// Levels fully drained, seeds included
    pub levels_completed: usize,

    /// URLs taken off the pending queue
    pub urls_claimed: usize,

    /// URLs skipped because the availability probe failed
    pub unreachable: usize,

    /// URLs whose fetch failed after a successful probe
    pub fetch_failures: usize,

    /// Page summaries collected
    pub pages_collected: usize,

    /// Links staged for a following level
    pub links_staged: usize,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

/// Live counters shared by the workers of a crawl
#[derive(Debug, Default)]
pub struct CrawlCounters {
    levels_completed: AtomicUsize,
    urls_claimed: AtomicUsize,
    unreachable: AtomicUsize,
    fetch_failures: AtomicUsize,
    pages_collected: AtomicUsize,
    links_staged: AtomicUsize,
}

impl CrawlCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level_completed(&self) {
        self.levels_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn url_claimed(&self) {
        self.urls_claimed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn unreachable(&self) {
        self.unreachable.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_failed(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn page_collected(&self) {
        self.pages_collected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn links_staged(&self, count: usize) {
        self.links_staged.fetch_add(count, Ordering::Relaxed);
    }

    /// Reads every counter into a [`CrawlStatistics`]
    pub fn snapshot(&self, elapsed: Duration) -> CrawlStatistics {
        CrawlStatistics {
            levels_completed: self.levels_completed.load(Ordering::Relaxed),
            urls_claimed: self.urls_claimed.load(Ordering::Relaxed),
            unreachable: self.unreachable.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            pages_collected: self.pages_collected.load(Ordering::Relaxed),
            links_staged: self.links_staged.load(Ordering::Relaxed),
            elapsed,
        }
    }
}

/// Renders statistics as a human-readable block
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "=== Crawl Statistics ===\n");
    let _ = writeln!(out, "Overview:");
    let _ = writeln!(out, "  Levels completed: {}", stats.levels_completed);
    let _ = writeln!(out, "  URLs claimed: {}", stats.urls_claimed);
    let _ = writeln!(out, "  Links staged: {}", stats.links_staged);
    let _ = writeln!(out, "  Elapsed: {:.2}s", stats.elapsed.as_secs_f64());
    let _ = writeln!(out);

    let _ = writeln!(out, "Outcomes:");
    let _ = writeln!(out, "  Pages collected: {}", stats.pages_collected);
    let _ = writeln!(out, "  Unreachable: {}", stats.unreachable);
    let _ = writeln!(out, "  Fetch failures: {}", stats.fetch_failures);
    let _ = writeln!(out);

    let success_rate = if stats.urls_claimed > 0 {
        (stats.pages_collected as f64 / stats.urls_claimed as f64) * 100.0
    } else {
        0.0
    };

    let _ = writeln!(
        out,
        "Success Rate: {:.1}% ({} / {} URLs summarized)",
        success_rate, stats.pages_collected, stats.urls_claimed
    );

    out
}

/// Prints statistics to stderr, keeping stdout free for results
pub fn print_statistics(stats: &CrawlStatistics) {
    eprint!("{}", format_statistics(stats));
}
