use anyhow::Result;
use async_trait::async_trait;
use futures::FutureExt;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_CHARSET, HeaderMap, HeaderValue, LOCATION};
use reqwest::redirect::Policy;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::config::CrawlerConfig;

/// Raw answer of a single GET request
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Option<String>,
    pub headers: HeaderMap,
}

impl FetchResponse {
    pub fn new(status: u16, body: Option<String>, headers: HeaderMap) -> Self {
        Self { status, body, headers }
    }

    /// All values of header `name` in the order they were received.
    /// Values that are not valid UTF-8 are skipped.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }
}

/// Transport used by the crawler. Implementations enforce their own timeout and
/// return an error for anything that prevents a response from arriving.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse>;
}

pub type FetcherRef = Arc<dyn Fetcher>;

/// `Fetcher` backed by reqwest. Redirects are not followed by the client so the
/// crawler can see them.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        headers.insert(ACCEPT_CHARSET, HeaderValue::from_static("utf-8"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_sec))
            .redirect(Policy::none())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(FetchResponse::new(status, Some(body), headers))
    }
}

/// Outcome of one network call as seen by the crawler
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Content(String),
    Redirect(Url),
    Failure,
}

impl FetchResult {
    /// Runs `call` and classifies what came back. Errors and panics inside `call`
    /// become `Failure`; nothing is retried and redirects are not followed.
    pub async fn wrap<F>(call: F) -> FetchResult
    where
        F: Future<Output = Result<FetchResponse>>,
    {
        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(response)) => Self::classify(response),
            Ok(Err(_)) | Err(_) => FetchResult::Failure,
        }
    }

    pub fn classify(response: FetchResponse) -> FetchResult {
        match response.status {
            200..=299 => FetchResult::Content(response.body.unwrap_or_default()),
            301..=399 => Self::redirect(&response),
            _ => FetchResult::Failure,
        }
    }

    fn redirect(response: &FetchResponse) -> FetchResult {
        let location = response.header_values(LOCATION.as_str()).into_iter().next();

        match location.map(Url::parse) {
            Some(Ok(next_url)) => FetchResult::Redirect(next_url),
            _ => FetchResult::Failure,
        }
    }
}
