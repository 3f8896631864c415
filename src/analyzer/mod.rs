//! Keyword, sentiment and report generation.
//!
//! The [`Analyzer`] turns raw text into a ranked keyword list and a coarse
//! [`Sentiment`], and assembles both into a [`Report`]. It holds only data
//! loaded at startup and is never mutated, so one instance can be shared
//! across threads behind an `Arc`.
//!
//! # Submodules
//!
//! - [`keywords`]: jieba segmentation and TF-IDF ranking
//! - [`idf`]: the background IDF table
//! - [`sentiment`]: the positive/negative lexicon
//!
//! Every operation is a pure function of its input and the loaded
//! configuration; none of them can fail.

pub mod idf;
pub mod keywords;
pub mod sentiment;

use crate::config::AnalyzerConfig;
use crate::models::{Analysis, Keyword, Report, Sentiment};
use chrono::{Local, NaiveDate};
use idf::IdfTable;
use keywords::KeywordExtractor;
use once_cell::sync::Lazy;
use sentiment::Lexicon;
use std::error::Error;
use tracing::{debug, info, instrument};

/// Analyzer built from the default configuration, created on first use.
static DEFAULT_ANALYZER: Lazy<Analyzer> = Lazy::new(|| Analyzer::new(&AnalyzerConfig::default()));

/// Keyword extractor, sentiment lexicon and report defaults loaded from an
/// [`AnalyzerConfig`].
#[derive(Debug)]
pub struct Analyzer {
    extractor: KeywordExtractor,
    lexicon: Lexicon,
    top_k: usize,
    default_source: String,
}

impl Analyzer {
    /// Build an analyzer using the bundled IDF table.
    ///
    /// `config.idf_path` is ignored; use [`Analyzer::from_config`] to load it.
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self::with_idf(config, IdfTable::bundled())
    }

    /// Build an analyzer, loading the IDF table named by the configuration.
    #[instrument(level = "info", skip_all)]
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, Box<dyn Error>> {
        let idf = match &config.idf_path {
            Some(path) => IdfTable::load(path)?,
            None => IdfTable::bundled(),
        };
        let analyzer = Self::with_idf(config, idf);
        info!(top_k = analyzer.top_k, "Analyzer ready");
        Ok(analyzer)
    }

    fn with_idf(config: &AnalyzerConfig, idf: IdfTable) -> Self {
        Self {
            extractor: KeywordExtractor::new(idf, &config.stop_words),
            lexicon: Lexicon::from(&config.lexicon),
            top_k: config.top_k,
            default_source: config.default_source.clone(),
        }
    }

    /// Keywords kept per report.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// At most `top_k` keywords of `text`, ordered by weight descending.
    pub fn extract_keywords(&self, text: &str, top_k: usize) -> Vec<Keyword> {
        self.extractor.extract(text, top_k)
    }

    pub fn classify_sentiment(&self, text: &str) -> Sentiment {
        self.lexicon.classify(text)
    }

    /// Keywords, sentiment and a one-line summary for `content`.
    pub fn analyze(&self, content: &str, top_k: usize) -> Analysis {
        let keywords = self.extract_keywords(content, top_k);
        let sentiment = self.classify_sentiment(content);
        let summary = summary_line(keywords.len(), sentiment);
        debug!(keywords = keywords.len(), %sentiment, "Analyzed content");
        Analysis {
            keywords,
            sentiment,
            summary,
        }
    }

    /// Assemble a report dated today.
    ///
    /// No validation is performed: empty content yields a report with no
    /// keywords and a neutral sentiment.
    pub fn generate_report(
        &self,
        title: &str,
        content: &str,
        source: Option<&str>,
        created_by: Option<&str>,
    ) -> Report {
        self.generate_report_on(Local::now().date_naive(), title, content, source, created_by)
    }

    /// Assemble a report with an explicit date.
    pub fn generate_report_on(
        &self,
        report_date: NaiveDate,
        title: &str,
        content: &str,
        source: Option<&str>,
        created_by: Option<&str>,
    ) -> Report {
        let keywords = self.extract_keywords(content, self.top_k);
        let sentiment = self.classify_sentiment(content);
        debug!(%title, keywords = keywords.len(), %sentiment, "Generated report");
        Report {
            title: title.to_string(),
            content: content.to_string(),
            keywords,
            sentiment,
            source: source.unwrap_or(&self.default_source).to_string(),
            report_date,
            created_by: created_by.map(str::to_string),
        }
    }
}

/// `分析完成，共提取{N}个关键词，情感倾向为{label}。`
pub fn summary_line(keyword_count: usize, sentiment: Sentiment) -> String {
    format!(
        "分析完成，共提取{}个关键词，情感倾向为{}。",
        keyword_count,
        sentiment.display_label()
    )
}

/// [`Analyzer::extract_keywords`] on the default analyzer.
pub fn extract_keywords(text: &str, top_k: usize) -> Vec<Keyword> {
    DEFAULT_ANALYZER.extract_keywords(text, top_k)
}

/// [`Analyzer::classify_sentiment`] on the default analyzer.
pub fn classify_sentiment(text: &str) -> Sentiment {
    DEFAULT_ANALYZER.classify_sentiment(text)
}

/// [`Analyzer::generate_report`] on the default analyzer.
pub fn generate_report(title: &str, content: &str, source: Option<&str>) -> Report {
    DEFAULT_ANALYZER.generate_report(title, content, source, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "西昌市通过发展特色农业和乡村旅游，带动当地经济发展，农民收入持续增长。";

    #[test]
    fn test_free_functions() {
        assert!(extract_keywords("", 5).is_empty());
        assert!(extract_keywords(CONTENT, 3).len() <= 3);
        assert_eq!(classify_sentiment("问题 成功"), Sentiment::Neutral);
        assert_eq!(classify_sentiment("成功 成功 投诉"), Sentiment::Positive);
    }

    #[test]
    fn test_generate_report_defaults() {
        let report = generate_report("乡村振兴", CONTENT, None);
        assert_eq!(report.title, "乡村振兴");
        assert_eq!(report.content, CONTENT);
        assert_eq!(report.source, "手动输入");
        assert_eq!(report.sentiment, Sentiment::Positive);
        assert!(!report.keywords.is_empty());
        assert!(report.keywords.len() <= 10);
        assert_eq!(report.report_date, Local::now().date_naive());
        assert!(report.created_by.is_none());
    }

    #[test]
    fn test_generate_report_from_empty_content() {
        let analyzer = Analyzer::new(&AnalyzerConfig::default());
        let report = analyzer.generate_report("", "", Some("人民日报"), Some("user1"));
        assert!(report.keywords.is_empty());
        assert_eq!(report.sentiment, Sentiment::Neutral);
        assert_eq!(report.source, "人民日报");
        assert_eq!(report.created_by.as_deref(), Some("user1"));
    }

    #[test]
    fn test_generate_report_is_repeatable() {
        let analyzer = Analyzer::new(&AnalyzerConfig::default());
        let date = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();
        let a = analyzer.generate_report_on(date, "t", CONTENT, None, None);
        let b = analyzer.generate_report_on(date, "t", CONTENT, None, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_report_uses_configured_top_k_and_source() {
        let config = AnalyzerConfig {
            top_k: 2,
            default_source: "综合新闻".to_string(),
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(&config);
        let report = analyzer.generate_report("t", CONTENT, None, None);
        assert!(report.keywords.len() <= 2);
        assert_eq!(report.source, "综合新闻");
    }

    #[test]
    fn test_analyze_summary() {
        let analyzer = Analyzer::new(&AnalyzerConfig::default());
        let analysis = analyzer.analyze("rocket launch failure, 投诉", 10);
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert_eq!(
            analysis.summary,
            format!("分析完成，共提取{}个关键词，情感倾向为消极。", analysis.keywords.len())
        );
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(summary_line(0, Sentiment::Neutral), "分析完成，共提取0个关键词，情感倾向为中性。");
        assert_eq!(summary_line(3, Sentiment::Positive), "分析完成，共提取3个关键词，情感倾向为积极。");
    }

    #[test]
    fn test_from_config_missing_idf_file_errors() {
        let config = AnalyzerConfig {
            idf_path: Some("/nonexistent/idf.txt".to_string()),
            ..AnalyzerConfig::default()
        };
        assert!(Analyzer::from_config(&config).is_err());
    }
}
