//! Baidu News search scraper.
//!
//! Best effort only: the parsers below key off class names and text-length
//! heuristics of Baidu's result markup, which changes without notice.
//!
//! Two passes are made over a result page:
//!
//! 1. **Basic**: one `div.result` container per item with well-known child classes.
//! 2. **Advanced**: every `h3` headline link, with summary, source and cover
//!    guessed from the enclosing `div`; failing that, any long absolute link.

use super::NewsSource;
use crate::fetch::FetchAsync;
use crate::models::NewsItem;
use crate::utils::crawl_timestamp;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};
use url::Url;

const SEARCH_URL: &str = "https://www.baidu.com/s?rtt=1&bsst=1&cl=2&tn=news&word=";
const BASE_URL: &str = "https://www.baidu.com";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

static RESULT: Lazy<Selector> = Lazy::new(|| selector("div.result"));
static NEWS_TITLE: Lazy<Selector> = Lazy::new(|| selector("h3.news-title"));
static SUMMARY: Lazy<Selector> = Lazy::new(|| selector("div.c-summary"));
static AUTHOR: Lazy<Selector> = Lazy::new(|| selector("p.c-author"));
static H3: Lazy<Selector> = Lazy::new(|| selector("h3"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a"));
static HREF_LINK: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static IMG: Lazy<Selector> = Lazy::new(|| selector("img"));
static CLASSED_DIV: Lazy<Selector> = Lazy::new(|| selector("div[class]"));
static CLASSED_SPAN: Lazy<Selector> = Lazy::new(|| selector("span[class]"));
static ABSOLUTE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").expect("static regex"));

/// Live Baidu News source.
#[derive(Debug)]
pub struct BaiduNewsSource<F> {
    fetcher: F,
}

impl<F: FetchAsync> BaiduNewsSource<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn search_url(keyword: &str) -> String {
        format!("{}{}", SEARCH_URL, urlencoding::encode(keyword))
    }
}

impl<F: FetchAsync> NewsSource for BaiduNewsSource<F> {
    #[instrument(level = "info", skip(self))]
    async fn search(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<NewsItem>, Box<dyn Error + Send + Sync>> {
        let html = self.fetcher.fetch(&Self::search_url(keyword)).await?;
        debug!(bytes = html.len(), "Fetched Baidu result page");
        Ok(parse_results(&html, limit))
    }
}

/// Basic parse, then the advanced parse when the basic one finds nothing.
/// Results are de-duplicated by URL.
pub fn parse_results(html: &str, limit: usize) -> Vec<NewsItem> {
    let mut items = parse_news_html(html, limit);
    if items.is_empty() {
        items = parse_advanced_news_html(html, limit);
    }
    let items: Vec<NewsItem> = items
        .into_iter()
        .unique_by(|item| item.url.clone())
        .take(limit)
        .collect();
    info!(count = items.len(), "Parsed Baidu results");
    items
}

/// Text of an element with each text node trimmed and concatenated.
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Resolve protocol-relative and root-relative image URLs.
pub fn normalize_cover(src: &str) -> String {
    if src.starts_with('/') {
        if let Ok(resolved) = Url::parse(BASE_URL).and_then(|base| base.join(src)) {
            return resolved.to_string();
        }
    }
    src.to_string()
}

fn cover_in(element: ElementRef<'_>) -> String {
    element
        .select(&IMG)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(normalize_cover)
        .unwrap_or_default()
}

/// Parse `div.result` containers.
pub fn parse_news_html(html: &str, limit: usize) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    document
        .select(&RESULT)
        .take(limit)
        .filter_map(extract_news_info)
        .collect()
}

fn extract_news_info(container: ElementRef<'_>) -> Option<NewsItem> {
    let link = container
        .select(&NEWS_TITLE)
        .next()
        .and_then(|h3| h3.select(&LINK).next());
    let title = link.map(text_of).unwrap_or_default();
    if title.is_empty() {
        debug!("Skipping result container without a title");
        return None;
    }
    let url = link
        .and_then(|a| a.value().attr("href"))
        .unwrap_or_default()
        .to_string();

    let summary = container
        .select(&SUMMARY)
        .next()
        .map(text_of)
        .unwrap_or_default();

    let mut source = String::new();
    let mut publish_time = None;
    if let Some(author) = container.select(&AUTHOR).next() {
        let text = text_of(author);
        let parts: Vec<&str> = text.split(' ').collect();
        if parts.len() >= 2 {
            source = parts[0].to_string();
            publish_time = Some(parts[1].to_string());
        }
    }

    Some(NewsItem {
        title,
        summary,
        source,
        url,
        cover: cover_in(container),
        crawl_time: crawl_timestamp(),
        publish_time,
    })
}

/// Parse headline links, falling back to any long absolute link.
pub fn parse_advanced_news_html(html: &str, limit: usize) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let mut items = Vec::new();

    for heading in document.select(&H3).take(limit.saturating_mul(2)) {
        if items.len() >= limit {
            break;
        }
        let Some(link) = heading.select(&LINK).next() else {
            continue;
        };
        let title = text_of(link);
        if title.chars().count() <= 5 || title.starts_with("百度") {
            continue;
        }
        let url = link.value().attr("href").unwrap_or_default().to_string();

        let mut summary = String::new();
        let mut source = "百度新闻".to_string();
        let mut cover = String::new();
        if let Some(parent) = heading
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "div")
        {
            // `select` can yield the scope element itself; only descendants count.
            if let Some(text) = parent
                .select(&CLASSED_DIV)
                .filter(|div| div.id() != parent.id())
                .map(text_of)
                .find(|t| (21..200).contains(&t.chars().count()))
            {
                summary = text;
            }
            if let Some(text) = parent
                .select(&CLASSED_SPAN)
                .map(text_of)
                .find(|t| t.contains('·') || t.contains('前') || t.contains("小时"))
            {
                source = text;
            }
            cover = cover_in(parent);
        }

        items.push(NewsItem {
            title,
            summary,
            source,
            url,
            cover,
            crawl_time: crawl_timestamp(),
            publish_time: None,
        });
    }

    if items.is_empty() {
        items = document
            .select(&HREF_LINK)
            .filter(|a| a.value().attr("href").is_some_and(|h| ABSOLUTE_URL.is_match(h)))
            .take(limit.saturating_mul(3))
            .filter_map(|a| {
                let title = text_of(a);
                let keep = title.chars().count() > 10
                    && !title.starts_with("百度")
                    && !title.contains("首页")
                    && !title.contains("登录");
                keep.then(|| NewsItem {
                    title,
                    summary: String::new(),
                    source: "网络来源".to_string(),
                    url: a.value().attr("href").unwrap_or_default().to_string(),
                    cover: String::new(),
                    crawl_time: crawl_timestamp(),
                    publish_time: None,
                })
            })
            .take(limit)
            .collect();
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = r#"
        <html><body>
          <div class="result">
            <h3 class="news-title"><a href="https://news.example.com/a">西昌 卫星发射成功</a></h3>
            <div class="c-summary">卫星顺利进入预定轨道。</div>
            <p class="c-author">新华社 3小时前</p>
            <img src="//img.example.com/a.jpg">
          </div>
          <div class="result">
            <h3 class="news-title"><a href="https://news.example.com/b">乡村振兴新进展</a></h3>
            <img src="/img/b.jpg">
          </div>
          <div class="result"><p>no title here</p></div>
        </body></html>
    "#;

    const ADVANCED: &str = r#"
        <html><body>
          <div class="item">
            <h3><a href="https://news.example.com/c">人工智能产业持续快速发展</a></h3>
            <div class="short">太短</div>
            <div class="abstract">人工智能产业规模持续扩大，多个行业加快引入智能化解决方案，带动效率提升。</div>
            <span class="meta">科技日报 · 2小时前</span>
          </div>
          <div><h3><a href="https://www.baidu.com/x">百度一下你就知道了吧</a></h3></div>
          <div><h3><a href="https://news.example.com/short">短标题</a></h3></div>
        </body></html>
    "#;

    const LINKS_ONLY: &str = r#"
        <html><body>
          <a href="https://news.example.com/d">这是一条足够长的新闻标题文本内容</a>
          <a href="/relative">这是一条相对链接的新闻标题文本内容</a>
          <a href="https://www.baidu.com/">百度首页的链接文字足够长足够长</a>
          <a href="https://passport.example.com/">请登录后查看更多精彩内容吧朋友</a>
          <a href="https://news.example.com/e">短</a>
        </body></html>
    "#;

    #[test]
    fn test_basic_parse() {
        let items = parse_news_html(BASIC, 10);
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "西昌 卫星发射成功");
        assert_eq!(items[0].url, "https://news.example.com/a");
        assert_eq!(items[0].summary, "卫星顺利进入预定轨道。");
        assert_eq!(items[0].source, "新华社");
        assert_eq!(items[0].publish_time.as_deref(), Some("3小时前"));
        assert_eq!(items[0].cover, "https://img.example.com/a.jpg");

        assert_eq!(items[1].summary, "");
        assert_eq!(items[1].source, "");
        assert_eq!(items[1].cover, "https://www.baidu.com/img/b.jpg");
    }

    #[test]
    fn test_basic_parse_limit() {
        assert_eq!(parse_news_html(BASIC, 1).len(), 1);
    }

    #[test]
    fn test_advanced_parse() {
        assert!(parse_news_html(ADVANCED, 10).is_empty());
        let items = parse_advanced_news_html(ADVANCED, 10);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "人工智能产业持续快速发展");
        assert!(items[0].summary.starts_with("人工智能产业规模"));
        assert_eq!(items[0].source, "科技日报 · 2小时前");
        assert_eq!(items[0].cover, "");
    }

    #[test]
    fn test_link_fallback() {
        let items = parse_advanced_news_html(LINKS_ONLY, 10);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://news.example.com/d");
        assert_eq!(items[0].source, "网络来源");
    }

    #[test]
    fn test_parse_results_dedupes() {
        let html = format!("{BASIC}{BASIC}");
        let items = parse_results(&html, 10);
        assert_eq!(items.len(), 2);
        assert_eq!(parse_results(ADVANCED, 10).len(), 1);
        assert!(parse_results("<html></html>", 10).is_empty());
    }

    #[test]
    fn test_normalize_cover() {
        assert_eq!(normalize_cover("//a.com/x.jpg"), "https://a.com/x.jpg");
        assert_eq!(normalize_cover("/x.jpg"), "https://www.baidu.com/x.jpg");
        assert_eq!(normalize_cover("https://a.com/x.jpg"), "https://a.com/x.jpg");
        assert_eq!(normalize_cover(""), "");
        assert_eq!(normalize_cover("//a.com"), "https://a.com/");
        assert_eq!(normalize_cover("/a b.jpg"), "https://www.baidu.com/a%20b.jpg");
    }

    #[test]
    fn test_search_url_encodes_keyword() {
        let url = BaiduNewsSource::<crate::fetch::HttpFetcher>::search_url("西昌 新闻");
        assert!(url.starts_with(SEARCH_URL));
        assert!(url.ends_with("%E8%A5%BF%E6%98%8C%20%E6%96%B0%E9%97%BB"));
    }

    struct Canned(&'static str);

    impl FetchAsync for Canned {
        async fn fetch(&self, _url: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_search_parses_fetched_page() {
        let source = BaiduNewsSource::new(Canned(BASIC));
        let items = source.search("西昌", 5).await.unwrap();
        assert_eq!(items.len(), 2);
    }
}
