use anyhow::Result;
use log2::{debug, warn};
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

use super::config::CrawlerConfig;
use super::extract::extract_urls;
use super::fetch::{FetchResult, FetcherRef, HttpFetcher};
use super::link::Link;

/// Turns a page URL into the links found on it. Shared by both crawl strategies.
pub struct PageExpander {
    fetcher: FetcherRef,
    max_redirects: Option<usize>,
    permits: Option<Arc<Semaphore>>,
}

pub type PageExpanderRef = Arc<PageExpander>;

impl PageExpander {
    pub fn new(fetcher: FetcherRef, config: &CrawlerConfig) -> Self {
        Self {
            fetcher,
            max_redirects: config.max_redirects,
            permits: config.max_concurrency.map(|n| Arc::new(Semaphore::new(n))),
        }
    }

    /// Expander over the real network
    pub fn http(config: &CrawlerConfig) -> Result<Self> {
        let fetcher: FetcherRef = Arc::new(HttpFetcher::new(config)?);
        Ok(Self::new(fetcher, config))
    }

    /// Single network call, waiting for a free slot first when concurrency is bounded
    pub async fn fetch(&self, url: &Url) -> FetchResult {
        let _permit = match &self.permits {
            Some(permits) => permits.acquire().await.ok(),
            None => None,
        };
        FetchResult::wrap(self.fetcher.fetch(url)).await
    }

    /// Fetches `link`, following redirects wherever they point, and returns every
    /// link on the final page that parses as a URL, in order of appearance.
    /// A failed fetch yields no links.
    pub async fn links_within(&self, link: &Link) -> Vec<Link> {
        let mut current = link.url().clone();
        let mut hops = 0;

        loop {
            match self.fetch(&current).await {
                FetchResult::Content(text) => {
                    let links = parse_candidates(&text);
                    debug!("Found {} links on page {}", links.len(), current);
                    return links;
                }
                FetchResult::Redirect(next) => {
                    hops += 1;
                    if self.max_redirects.is_some_and(|max| hops > max) {
                        warn!("Giving up on {} after {} redirects", link, hops - 1);
                        return Vec::new();
                    }
                    debug!("{} redirects to {}", current, next);
                    current = next;
                }
                FetchResult::Failure => {
                    debug!("Failed to fetch {}", current);
                    return Vec::new();
                }
            }
        }
    }
}

/// Extracts URL candidates from `text`, dropping the ones that fail to parse.
/// Each link keeps the text it was written with.
fn parse_candidates(text: &str) -> Vec<Link> {
    extract_urls(text)
        .into_iter()
        .filter_map(|candidate| match Link::parse(&candidate) {
            Ok(link) => Some(link),
            Err(e) => {
                debug!("Discarding candidate {}: {}", candidate, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_candidates;
    use crate::crawler::link::Link;

    fn texts(links: &[Link]) -> Vec<&str> {
        links.iter().map(Link::as_str).collect()
    }

    #[test]
    fn test_parse_candidates_keeps_order() {
        let links = parse_candidates("blah https://somewebsite.com/otherpage then http://www.notsomewebsite.com?q=12234");
        assert_eq!(
            texts(&links),
            vec!["https://somewebsite.com/otherpage", "http://www.notsomewebsite.com?q=12234"]
        );
    }

    /// An unparseable candidate is dropped without affecting its neighbours
    #[test]
    fn test_parse_candidates_skips_invalid() {
        let links = parse_candidates("http://:80 https://fine.com ftp://@ http://ok.org");
        assert_eq!(texts(&links), vec!["https://fine.com", "http://ok.org"]);
    }

    #[test]
    fn test_parse_candidates_keeps_written_form() {
        let links = parse_candidates("https://somewebsite.com/a/../b https://SOMEWEBSITE.com:443/b");
        assert_eq!(texts(&links), vec!["https://somewebsite.com/a/../b", "https://SOMEWEBSITE.com:443/b"]);
        assert_eq!(links[0].url(), links[1].url());
    }
}
