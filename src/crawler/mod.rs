pub mod config;
pub mod extract;
pub mod fetch;
pub mod link;
pub mod runner;
pub mod scope;
pub mod scrape;
pub mod site_map;
pub mod state;
pub mod visit_set;


pub use config::{CrawlerConfig, CrawlerConfigRef, LINK_REQUEST_TIMEOUT_SEC};
pub use extract::extract_urls;
pub use fetch::{FetchResponse, FetchResult, Fetcher, FetcherRef, HttpFetcher};
pub use link::Link;
pub use runner::crawl;
pub use scope::in_scope;
pub use scrape::{PageExpander, PageExpanderRef};
pub use site_map::{PendingNode, SiteMapNode, build_site_map};
pub use state::{CrawlStatistics, CrawlerState, CrawlerStateRef};
pub use visit_set::ConcurrentSet;
