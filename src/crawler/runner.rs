use log2::*;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::time::{Duration, sleep};

use super::config::CrawlerConfigRef;
use super::link::Link;
use super::scope::in_scope;
use super::scrape::PageExpanderRef;
use super::state::{CrawlStatistics, CrawlerStateRef, InFlightGuard};

/// Flat crawl: drains the queue in `crawler_state_ref`, spawning one task per newly
/// claimed in-scope page, until the queue is empty and no page is still being expanded.
pub async fn crawl(
    crawler_state_ref: CrawlerStateRef,
    expander: PageExpanderRef,
    crawler_cfg_ref: CrawlerConfigRef,
) -> CrawlStatistics {
    let state = crawler_state_ref;
    let idle = Duration::from_millis(crawler_cfg_ref.idle_poll_ms);
    info!("Crawling from {}", state.starting_url);

    loop {
        let next_item = {
            let mut queue = state.link_to_crawl_queue.write().await;
            queue.pop_front()
        };

        match next_item {
            Some(link) => dispatch(&state, &expander, link),
            None => {
                // Tasks enqueue before releasing their in-flight slot, so once the
                // counter reads zero the queue holds everything they produced.
                if state.in_flight.load(Ordering::SeqCst) == 0 {
                    let queue_empty = state.link_to_crawl_queue.read().await.is_empty();
                    if queue_empty {
                        break;
                    }
                    continue;
                }
                sleep(idle).await;
            }
        }
    }

    let statistics = state.statistics();
    info!(
        "Crawl finished: {} visited, {} seen",
        statistics.visited.len(),
        statistics.seen.len()
    );
    statistics
}

fn dispatch(state: &CrawlerStateRef, expander: &PageExpanderRef, link: Link) {
    state.seen.insert(link.clone());

    if !in_scope(&state.starting_url, &link) {
        debug!("Not following foreign link {}", link);
        return;
    }
    if !state.visited.insert(link.clone()) {
        trace!("Already visited {}", link);
        return;
    }

    let guard = InFlightGuard::enter(state);
    let state = Arc::clone(state);
    let expander = Arc::clone(expander);

    tokio::spawn(async move {
        let _guard = guard;
        debug!("Crawling {}", link);
        let found_links = expander.links_within(&link).await;

        for found_link in &found_links {
            state.seen.insert(found_link.clone());
        }
        let mut queue = state.link_to_crawl_queue.write().await;
        queue.extend(found_links);
    });
}
