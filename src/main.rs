use anyhow::Result;
use log2::*;
use site_crawler::config::{self, Mode};
use site_crawler::crawler::{self, PageExpander};
use site_crawler::report;
use std::sync::Arc;
use std::time::Instant;

/// Indicates start time of a project, lazily initialized
pub static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

#[tokio::main]
async fn main() -> Result<()> {
    let _ = *START_TIME;
    let cfg = config::Config::new();
    cfg.validate()?;
    let _log2 = stdout()
        .module(true) // include module name
        .module_with_line(true) // include line number from module
        .module_filter(|module| module.starts_with("site_crawler")) // include only modules having this pattern
        .compress(false) // compress output
        .level(cfg.log_level.to_string()) // level of logging (trace - error)
        .start();

    let start_url = config::parse_start_url(&cfg.start_url)?;
    let crawler_config = Arc::new(cfg.crawler_config());
    let expander = Arc::new(PageExpander::http(&crawler_config)?);

    let entries = match cfg.mode {
        Mode::Flat => {
            let state = Arc::new(crawler::CrawlerState::new(start_url));
            let statistics = crawler::crawl(state, expander, crawler_config).await;
            print!("{}", report::format_statistics(&statistics));

            if let Some(path) = &cfg.output_file {
                std::fs::write(path, report::statistics_json(&statistics)?)?;
            }
            statistics.visited.len()
        }
        Mode::Tree => {
            let root = crawler::build_site_map(start_url, expander).await;
            let rendered = report::render_tree(&root).await;
            print!("{}", rendered);

            if let Some(path) = &cfg.output_file {
                std::fs::write(path, &rendered)?;
            }
            root.node_count().await
        }
    };

    if let Some(path) = &cfg.output_file {
        info!("Result written to {:?}", path);
    }
    info!("Done in {:?} ({} entries)", START_TIME.elapsed(), entries);

    Ok(())
}
