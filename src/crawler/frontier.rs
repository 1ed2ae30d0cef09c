//! Crawl frontier: pending queue, visited set, staged discoveries and results
//!
//! The frontier is the single source of truth for one crawl invocation. It is
//! shared by reference (behind an `Arc`) between the coordinator and its
//! workers, so every operation takes `&self` and guards its own state:
//!
//! - `queue` holds the pending queue and the visited set together, so that
//!   popping a URL and marking it visited is one atomic step
//! - `staging` holds the current level's discoveries; stagers append under
//!   this lock and never interleave partial writes
//! - `results` collects page summaries in completion order
//!
//! Lock guards are scoped to a single operation and never held across an
//! `.await`, so a panicking or cancelled worker cannot leak a lock.

use crate::crawler::parser::Document;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Summary of a successfully fetched page
///
/// Serializes with exactly three keys, in this order: `title`, `desc`, `url`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageSummary {
    pub title: String,

    #[serde(rename = "desc")]
    pub description: String,

    pub url: String,
}

impl PageSummary {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
        }
    }

    /// Builds the summary for `url` from its fetched document
    pub fn from_document(document: Document, url: &str) -> Self {
        Self {
            title: document.title,
            description: document.description,
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct QueueState {
    pending: VecDeque<String>,
    visited: HashSet<String>,
}

#[derive(Debug, Default)]
struct Staging {
    urls: Vec<String>,
    seen: HashSet<String>,
}

/// Mutable crawl state for a single crawl invocation
#[derive(Debug)]
pub struct Frontier {
    queue: Mutex<QueueState>,
    staging: Mutex<Staging>,
    results: Mutex<Vec<PageSummary>>,
    depth_remaining: AtomicU32,
}

impl Frontier {
    /// Creates a frontier whose pending queue holds `seeds` in the given order
    ///
    /// # Arguments
    ///
    /// * `seeds` - Initial URLs to crawl
    /// * `depth` - Number of link-discovery levels beyond the seeds
    pub fn new<I>(seeds: I, depth: u32) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            queue: Mutex::new(QueueState {
                pending: seeds.into_iter().collect(),
                visited: HashSet::new(),
            }),
            staging: Mutex::new(Staging::default()),
            results: Mutex::new(Vec::new()),
            depth_remaining: AtomicU32::new(depth),
        }
    }

    /// Pops the head of the pending queue and marks it visited
    ///
    /// URLs already visited (duplicate seeds, or duplicates that slipped past
    /// best-effort concurrent staging) are discarded rather than returned.
    /// Returns `None` once the queue is exhausted.
    pub fn claim_next(&self) -> Option<String> {
        let mut queue = lock(&self.queue);

        while let Some(url) = queue.pending.pop_front() {
            if queue.visited.insert(url.clone()) {
                return Some(url);
            }
            tracing::trace!("Dropping already visited URL: {}", url);
        }

        None
    }

    /// Appends a page summary to the results
    pub fn record_result(&self, summary: PageSummary) {
        lock(&self.results).push(summary);
    }

    /// Stages newly discovered URLs for the next level
    ///
    /// URLs that are already visited, or already staged during this level,
    /// are skipped. The visited check is taken from a snapshot, so a URL
    /// claimed concurrently may still get staged; `claim_next` and
    /// `advance_level` both drop it later.
    ///
    /// Returns the number of URLs actually staged.
    pub fn stage_discovered<I>(&self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let unvisited: Vec<String> = {
            let queue = lock(&self.queue);
            urls.into_iter()
                .filter(|url| !queue.visited.contains(url))
                .collect()
        };

        let mut staging = lock(&self.staging);
        let mut staged = 0;
        for url in unvisited {
            if staging.seen.insert(url.clone()) {
                staging.urls.push(url);
                staged += 1;
            }
        }

        staged
    }

    /// Closes the current level
    ///
    /// Moves every staged URL that is still unvisited to the back of the
    /// pending queue, clears the staging area and decrements the remaining
    /// depth. Must only be called once all workers of the level have finished.
    ///
    /// Returns whether another level should run, i.e. whether the pending
    /// queue is non-empty after the merge.
    pub fn advance_level(&self) -> bool {
        let discovered = {
            let mut staging = lock(&self.staging);
            staging.seen.clear();
            std::mem::take(&mut staging.urls)
        };

        let has_more = {
            let mut queue = lock(&self.queue);
            let unvisited: Vec<String> = discovered
                .into_iter()
                .filter(|url| !queue.visited.contains(url))
                .collect();
            let merged = merge_queues(&queue.pending, unvisited);
            queue.pending = merged;
            !queue.pending.is_empty()
        };

        let _ = self
            .depth_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |depth| {
                depth.checked_sub(1)
            });

        has_more
    }

    /// Returns true while links found on this level should be staged
    pub fn is_discovering(&self) -> bool {
        self.depth_remaining() > 0
    }

    pub fn depth_remaining(&self) -> u32 {
        self.depth_remaining.load(Ordering::SeqCst)
    }

    pub fn pending_len(&self) -> usize {
        lock(&self.queue).pending.len()
    }

    pub fn visited_len(&self) -> usize {
        lock(&self.queue).visited.len()
    }

    pub fn staged_len(&self) -> usize {
        lock(&self.staging).urls.len()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        lock(&self.queue).visited.contains(url)
    }

    /// Takes the collected summaries out of the frontier
    pub fn take_results(&self) -> Vec<PageSummary> {
        std::mem::take(&mut *lock(&self.results))
    }
}

/// Concatenates two queues, preserving the relative order of both
///
/// # Example
///
/// ```
/// use breakpoint_crawler::crawler::merge_queues;
/// use std::collections::VecDeque;
///
/// let base: VecDeque<&str> = VecDeque::from(vec!["foo", "bar"]);
/// let merged = merge_queues(&base, vec!["boo", "waa"]);
/// assert_eq!(merged, VecDeque::from(vec!["foo", "bar", "boo", "waa"]));
/// ```
pub fn merge_queues<T, I>(base: &VecDeque<T>, added: I) -> VecDeque<T>
where
    T: Clone,
    I: IntoIterator<Item = T>,
{
    base.iter().cloned().chain(added).collect()
}

/// Locks a mutex, recovering the data if a previous holder panicked
///
/// Every critical section in this module leaves its state consistent before
/// any point that could panic, so a poisoned lock carries usable data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
