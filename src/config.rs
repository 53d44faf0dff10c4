use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::crawler::config::DEFAULT_MAX_REDIRECTS;
use crate::crawler::{CrawlerConfig, LINK_REQUEST_TIMEOUT_SEC, Link};

/// Log levels as defined in log2 crate
#[derive(Debug, Serialize, Deserialize, Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Shape of the crawl output
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Visited and seen URL lists
    Flat,
    /// Indented site map
    Tree,
}

/// This struct is supposed to receive all program arguments while CrawlerConfig
/// describes only the crawler engine
#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// URL the crawl starts from; its host decides which links are followed
    pub start_url: String,
    /// Output shape
    #[arg(short, long, default_value = "flat", value_enum)]
    pub mode: Mode,
    /// Timeout of every single request in seconds
    #[arg(long, default_value_t = LINK_REQUEST_TIMEOUT_SEC)]
    pub request_timeout_sec: u64,
    /// Redirect hops followed for one page before giving up on it
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,
    /// Follow redirect chains however long they are
    #[arg(long)]
    pub unbounded_redirects: bool,
    /// Maximum number of requests in flight, unbounded when absent
    #[arg(long)]
    pub max_concurrency: Option<usize>,
    /// Write the result to this file as well (JSON for flat mode, the tree for tree mode)
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", value_enum)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.request_timeout_sec == 0 {
            anyhow::bail!("request_timeout_sec must be greater than 0");
        }
        if self.max_concurrency == Some(0) {
            anyhow::bail!("max_concurrency must be greater than 0");
        }
        Ok(())
    }

    pub fn crawler_config(&self) -> CrawlerConfig {
        let max_redirects = if self.unbounded_redirects {
            None
        } else {
            Some(self.max_redirects)
        };

        CrawlerConfig::new()
            .with_request_timeout(self.request_timeout_sec)
            .with_max_redirects(max_redirects)
            .with_max_concurrency(self.max_concurrency)
    }
}

/// Parses the starting URL. It has to be absolute and have a host,
/// otherwise every link would count as being on the same site.
/// The text is kept as typed, so its host is compared case-sensitively.
pub fn parse_start_url(raw: &str) -> anyhow::Result<Link> {
    let link = Link::parse(raw).with_context(|| format!("`{}` is not a valid URL", raw))?;
    if link.host().is_empty() {
        anyhow::bail!("`{}` has no host to crawl", raw);
    }
    Ok(link)
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() -> anyhow::Result<()> {
        let cfg = Config::try_parse_from(["site_crawler", "https://bbc.com"])?;
        cfg.validate()?;
        assert_eq!(cfg.mode, Mode::Flat);

        let crawler_cfg = cfg.crawler_config();
        assert_eq!(crawler_cfg.request_timeout_sec, 2);
        assert_eq!(crawler_cfg.max_redirects, Some(DEFAULT_MAX_REDIRECTS));
        assert_eq!(crawler_cfg.max_concurrency, None);
        Ok(())
    }

    #[test]
    fn test_options() -> anyhow::Result<()> {
        let cfg = Config::try_parse_from([
            "site_crawler",
            "https://bbc.com",
            "--mode",
            "tree",
            "--unbounded-redirects",
            "--max-concurrency",
            "8",
        ])?;
        assert_eq!(cfg.mode, Mode::Tree);
        assert_eq!(cfg.crawler_config().max_redirects, None);
        assert_eq!(cfg.crawler_config().max_concurrency, Some(8));
        Ok(())
    }

    #[test]
    fn test_max_redirects_flag() -> anyhow::Result<()> {
        let cfg = Config::try_parse_from(["site_crawler", "https://bbc.com", "--max-redirects", "3"])?;
        assert_eq!(cfg.crawler_config().max_redirects, Some(3));

        let cfg = Config::try_parse_from(["site_crawler", "https://bbc.com"])?;
        assert_eq!(Some(cfg.max_redirects), CrawlerConfig::new().max_redirects);
        Ok(())
    }

    #[test]
    fn test_exactly_one_start_url() {
        assert!(Config::try_parse_from(["site_crawler"]).is_err());
        assert!(Config::try_parse_from(["site_crawler", "https://a.com", "https://b.com"]).is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() -> anyhow::Result<()> {
        let cfg = Config::try_parse_from(["site_crawler", "https://bbc.com", "--max-concurrency", "0"])?;
        assert!(cfg.validate().is_err());
        Ok(())
    }

    #[test]
    fn test_parse_start_url() {
        assert_eq!(parse_start_url("http://bbc.com").unwrap().host(), "bbc.com");
        assert_eq!(parse_start_url("https://SomeWebsite.com").unwrap().as_str(), "https://SomeWebsite.com");
        assert!(parse_start_url("not a url").is_err());
        assert!(parse_start_url("bbc.com").is_err());
        assert!(parse_start_url("file:///tmp/index.html").is_err());
        assert!(parse_start_url("mailto:someone@bbc.com").is_err());
    }
}
