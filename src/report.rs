use futures::FutureExt;
use futures::future::BoxFuture;

use crate::crawler::{CrawlStatistics, Link, SiteMapNode};

/// Visited URLs followed by the ones seen but never fetched, each list sorted
pub fn format_statistics(statistics: &CrawlStatistics) -> String {
    let mut visited: Vec<&Link> = statistics.visited.iter().collect();
    visited.sort();
    let mut not_visited: Vec<&Link> = statistics.seen_not_visited().collect();
    not_visited.sort();

    let mut out = format!("visited ({}):\n", visited.len());
    for link in visited {
        out.push_str(&format!("  {}\n", link));
    }
    out.push_str(&format!("seen, but not visited ({}):\n", not_visited.len()));
    for link in not_visited {
        out.push_str(&format!("  {}\n", link));
    }
    out
}

pub fn statistics_json(statistics: &CrawlStatistics) -> serde_json::Result<String> {
    serde_json::to_string_pretty(statistics)
}

/// Renders the site map with two spaces of indentation per level.
/// Waits for every pending child, so this returns once the whole crawl is done.
pub async fn render_tree(root: &SiteMapNode) -> String {
    let mut out = String::new();
    render_node(root, 0, &mut out).await;
    out
}

fn render_node<'a>(node: &'a SiteMapNode, depth: usize, out: &'a mut String) -> BoxFuture<'a, ()> {
    async move {
        let marker = if !node.visited {
            " (not followed)"
        } else if node.seen_elsewhere {
            " (seen elsewhere)"
        } else {
            ""
        };
        out.push_str(&format!("{}{}{}\n", "  ".repeat(depth), node.url, marker));

        for child in node.resolved_children().await {
            render_node(&child, depth + 1, out).await;
        }
    }
    .boxed()
}
