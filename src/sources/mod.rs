//! News sources behind a narrow `search(keyword, limit)` interface.
//!
//! Callers only ever see [`NewsItem`]s, so the site-specific HTML heuristics
//! can be swapped or stubbed without touching them.
//!
//! # Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Canned table | [`mock`] | Static data | Exact keyword match only |
//! | Baidu News | [`baidu`] | HTML scraping | Two heuristic parsers, best effort |
//!
//! [`Crawler`] composes them: canned data wins, the live source is tried
//! next when enabled, and a live failure degrades to [`default_news`].

pub mod baidu;
pub mod mock;

use crate::models::NewsItem;
use crate::utils::crawl_timestamp;
use mock::MockNewsSource;
use std::error::Error;
use tracing::{info, instrument, warn};

/// A searchable source of news items.
pub trait NewsSource {
    /// Up to `limit` items matching `keyword`.
    async fn search(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<NewsItem>, Box<dyn Error + Send + Sync>>;
}

/// A single synthetic item used when the live source fails.
pub fn default_news(keyword: &str, limit: usize) -> Vec<NewsItem> {
    let item = NewsItem {
        title: format!("关于{}的最新动态", keyword),
        summary: format!("近期{}领域发展迅速，相关政策和市场环境持续优化。", keyword),
        source: "综合新闻".to_string(),
        url: format!("https://example.com/news/{}", urlencoding::encode(keyword)),
        cover: "https://example.com/images/news.jpg".to_string(),
        crawl_time: crawl_timestamp(),
        publish_time: None,
    };
    std::iter::once(item).take(limit).collect()
}

/// Canned data first, then the live source.
#[derive(Debug)]
pub struct Crawler<L> {
    mock: MockNewsSource,
    live: Option<L>,
}

impl<L: NewsSource> Crawler<L> {
    pub fn new(live: Option<L>) -> Self {
        Self {
            mock: MockNewsSource,
            live,
        }
    }

    /// Search for `keyword`. Never fails.
    ///
    /// Returns an empty list when there is no canned data for `keyword` and
    /// the live source is disabled.
    #[instrument(level = "info", skip(self))]
    pub async fn search(&self, keyword: &str, limit: usize) -> Vec<NewsItem> {
        if let Some(items) = self.mock.lookup(keyword, limit) {
            info!(count = items.len(), "Serving canned news");
            return items;
        }

        let Some(live) = &self.live else {
            info!("No canned news and live search disabled");
            return Vec::new();
        };

        match live.search(keyword, limit).await {
            Ok(items) => {
                info!(count = items.len(), "Live search finished");
                items
            }
            Err(e) => {
                warn!(error = %e, "Live search failed; using default news");
                default_news(keyword, limit)
            }
        }
    }
}
