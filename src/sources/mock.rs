//! Canned news used for demos and tests.

use super::NewsSource;
use crate::models::NewsItem;
use crate::utils::crawl_timestamp;
use std::error::Error;

/// (keyword, title, summary, url, source, cover)
type Entry = (&'static str, &'static str, &'static str, &'static str, &'static str, &'static str);

const CANNED: &[Entry] = &[
    (
        "西昌",
        "西昌卫星发射中心成功发射新型通信卫星",
        "西昌卫星发射中心近日成功将一颗新型通信卫星送入预定轨道，标志着我国航天事业取得新突破。",
        "https://example.com/news/1",
        "新华社",
        "https://example.com/images/satellite.jpg",
    ),
    (
        "西昌",
        "西昌市推进乡村振兴战略取得显著成效",
        "西昌市通过发展特色农业和乡村旅游，带动当地经济发展，农民收入持续增长。",
        "https://example.com/news/2",
        "人民日报",
        "https://example.com/images/countryside.jpg",
    ),
    (
        "科技",
        "人工智能技术在各行业应用加速推进",
        "随着AI技术的成熟，制造业、医疗、金融等行业纷纷引入AI解决方案，提升效率。",
        "https://example.com/news/3",
        "科技日报",
        "https://example.com/images/ai.jpg",
    ),
    (
        "财经",
        "A股市场震荡上行，投资者信心逐步恢复",
        "近期A股市场呈现震荡上行态势，政策利好不断释放，市场情绪逐步回暖。",
        "https://example.com/news/4",
        "财经网",
        "https://example.com/images/stock.jpg",
    ),
    (
        "人工智能",
        "大语言模型技术突破，AI应用场景不断扩展",
        "最新的大语言模型在理解和生成能力上取得重大突破，为各行业带来新的发展机遇。",
        "https://example.com/news/5",
        "AI科技评论",
        "https://example.com/images/llm.jpg",
    ),
];

/// Source answering only from the canned table.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockNewsSource;

impl MockNewsSource {
    /// Whether the table has entries for `keyword`.
    pub fn contains(&self, keyword: &str) -> bool {
        CANNED.iter().any(|entry| entry.0 == keyword)
    }

    /// Up to `limit` canned items, or `None` when `keyword` is unknown.
    pub fn lookup(&self, keyword: &str, limit: usize) -> Option<Vec<NewsItem>> {
        if !self.contains(keyword) {
            return None;
        }
        let crawl_time = crawl_timestamp();
        Some(
            CANNED
                .iter()
                .filter(|entry| entry.0 == keyword)
                .take(limit)
                .map(|&(_, title, summary, url, source, cover)| NewsItem {
                    title: title.to_string(),
                    summary: summary.to_string(),
                    source: source.to_string(),
                    url: url.to_string(),
                    cover: cover.to_string(),
                    crawl_time: crawl_time.clone(),
                    publish_time: None,
                })
                .collect(),
        )
    }
}

impl NewsSource for MockNewsSource {
    async fn search(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<NewsItem>, Box<dyn Error + Send + Sync>> {
        Ok(self.lookup(keyword, limit).unwrap_or_default())
    }
}
