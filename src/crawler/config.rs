use std::sync::Arc;

/// Default timeout for link requests in seconds
pub const LINK_REQUEST_TIMEOUT_SEC: u64 = 2;

/// Default number of redirect hops followed for a single page
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Configuration for the crawler engine
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub request_timeout_sec: u64,
    /// `None` follows redirect chains without limit
    pub max_redirects: Option<usize>,
    /// `None` lets every discovered page fetch at once
    pub max_concurrency: Option<usize>,
    pub idle_poll_ms: u64,
}

impl CrawlerConfig {
    pub fn new() -> Self {
        Self {
            request_timeout_sec: LINK_REQUEST_TIMEOUT_SEC,
            max_redirects: Some(DEFAULT_MAX_REDIRECTS),
            max_concurrency: None,
            idle_poll_ms: 20,
        }
    }

    pub fn with_request_timeout(mut self, timeout_sec: u64) -> Self {
        self.request_timeout_sec = timeout_sec;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: Option<usize>) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: Option<usize>) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_idle_poll(mut self, idle_poll_ms: u64) -> Self {
        self.idle_poll_ms = idle_poll_ms;
        self
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub type CrawlerConfigRef = Arc<CrawlerConfig>;
