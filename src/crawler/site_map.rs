use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use log2::*;
use std::sync::Arc;

use super::link::Link;
use super::scope::in_scope;
use super::scrape::PageExpanderRef;
use super::visit_set::ConcurrentSet;

/// Child of a node whose crawl may still be running. Awaiting it any number of
/// times yields the same node.
pub type PendingNode = Shared<BoxFuture<'static, SiteMapNode>>;

/// One page of the site map
#[derive(Clone)]
pub struct SiteMapNode {
    pub url: Link,
    /// Links found on the page, in discovery order
    pub children: Vec<PendingNode>,
    /// A fetch was attempted for this URL (here or along another path)
    pub visited: bool,
    /// The URL had already been claimed along another path; this node is a
    /// back-reference and carries no children
    pub seen_elsewhere: bool,
}

impl std::fmt::Debug for SiteMapNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteMapNode")
            .field("url", &self.url)
            .field("children", &self.children.len())
            .field("visited", &self.visited)
            .field("seen_elsewhere", &self.seen_elsewhere)
            .finish()
    }
}

impl SiteMapNode {
    fn leaf(url: Link, visited: bool, seen_elsewhere: bool) -> Self {
        Self {
            url,
            children: Vec::new(),
            visited,
            seen_elsewhere,
        }
    }

    /// Waits for every direct child, in discovery order
    pub async fn resolved_children(&self) -> Vec<SiteMapNode> {
        let mut resolved = Vec::with_capacity(self.children.len());
        for child in &self.children {
            resolved.push(child.clone().await);
        }
        resolved
    }

    /// Depth-first search for the first node whose URL is written exactly as `target`.
    /// Awaits children as it goes, so this waits on whatever part of the crawl it walks.
    pub fn find<'a>(&'a self, target: &'a Link) -> BoxFuture<'a, Option<SiteMapNode>> {
        async move {
            if &self.url == target {
                return Some(self.clone());
            }
            for child in &self.children {
                let child = child.clone().await;
                if let Some(found) = child.find(target).await {
                    return Some(found);
                }
            }
            None
        }
        .boxed()
    }

    /// Number of nodes in the tree, waiting for the whole crawl to finish
    pub fn node_count(&self) -> BoxFuture<'_, usize> {
        async move {
            let mut count = 1;
            for child in self.resolved_children().await {
                count += child.node_count().await;
            }
            count
        }
        .boxed()
    }
}

/// Tree crawl: builds the site map rooted at `starting_url`.
/// The root page is fetched before this returns; everything below it keeps
/// crawling in the background and is awaited through the children handles.
pub async fn build_site_map(starting_url: Link, expander: PageExpanderRef) -> SiteMapNode {
    info!("Building site map from {}", starting_url);
    let context = Arc::new(TreeContext {
        base: starting_url.clone(),
        visit_set: ConcurrentSet::new(),
        expander,
    });
    spawn_node(context, starting_url).await
}

struct TreeContext {
    base: Link,
    visit_set: ConcurrentSet<Link>,
    expander: PageExpanderRef,
}

/// Starts crawling `url` on its own task. If that task dies the node still
/// resolves, as a visited page without children.
fn spawn_node(context: Arc<TreeContext>, url: Link) -> PendingNode {
    let fallback = url.clone();
    let handle = tokio::spawn(crawl_node(context, url));

    async move {
        match handle.await {
            Ok(node) => node,
            Err(e) => {
                warn!("Crawl of {} did not complete: {}", fallback, e);
                SiteMapNode::leaf(fallback, true, false)
            }
        }
    }
    .boxed()
    .shared()
}

async fn crawl_node(context: Arc<TreeContext>, url: Link) -> SiteMapNode {
    if !in_scope(&context.base, &url) {
        debug!("Not following foreign link {}", url);
        return SiteMapNode::leaf(url, false, false);
    }
    if !context.visit_set.insert(url.clone()) {
        trace!("Already visited {}", url);
        return SiteMapNode::leaf(url, true, true);
    }

    debug!("Crawling {}", url);
    let links = context.expander.links_within(&url).await;
    let children = links
        .into_iter()
        .map(|link| spawn_node(Arc::clone(&context), link))
        .collect();

    SiteMapNode {
        url,
        children,
        visited: true,
        seen_elsewhere: false,
    }
}
