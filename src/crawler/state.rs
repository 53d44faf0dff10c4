use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::link::Link;
use super::visit_set::ConcurrentSet;

/// Current state of a flat crawl
pub struct CrawlerState {
    /// Host every followed link has to stay under
    pub starting_url: Link,
    /// Links waiting to be checked
    pub link_to_crawl_queue: RwLock<VecDeque<Link>>,
    /// Pages claimed whose expansion has not finished yet
    pub in_flight: AtomicUsize,
    /// Every URL met as a link, followed or not
    pub seen: ConcurrentSet<Link>,
    /// Every URL a fetch was attempted for
    pub visited: ConcurrentSet<Link>,
}

impl CrawlerState {
    pub fn new(starting_url: Link) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(starting_url.clone());

        Self {
            starting_url,
            link_to_crawl_queue: RwLock::new(queue),
            in_flight: AtomicUsize::new(0),
            seen: ConcurrentSet::new(),
            visited: ConcurrentSet::new(),
        }
    }

    pub fn statistics(&self) -> CrawlStatistics {
        CrawlStatistics {
            seen: self.seen.snapshot(),
            visited: self.visited.snapshot(),
        }
    }
}

pub type CrawlerStateRef = Arc<CrawlerState>;

/// Result of a flat crawl. `visited` is always a subset of `seen`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlStatistics {
    pub seen: HashSet<Link>,
    pub visited: HashSet<Link>,
}

impl CrawlStatistics {
    /// URLs met as links that were never fetched
    pub fn seen_not_visited(&self) -> impl Iterator<Item = &Link> {
        self.seen.difference(&self.visited)
    }
}

/// Holds one unit of the in-flight counter, released on drop so a panicking
/// expansion still lets the crawl finish.
pub(crate) struct InFlightGuard {
    state: CrawlerStateRef,
}

impl InFlightGuard {
    pub(crate) fn enter(state: &CrawlerStateRef) -> Self {
        state.in_flight.fetch_add(1, Ordering::SeqCst);
        Self { state: Arc::clone(state) }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
