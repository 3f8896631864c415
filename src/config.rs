//! Analyzer configuration.
//!
//! The configuration is read once at startup from an optional YAML file and
//! never mutated afterwards. Every field has a default, so an empty file (or
//! no file at all) yields a working analyzer.
//!
//! ```yaml
//! top_k: 10
//! default_source: 手动输入
//! max_content_chars: 20000
//! lexicon:
//!   positive: [好, 优秀, 满意]
//!   negative: [差, 问题, 投诉]
//! idf_path: /usr/share/jieba/idf.txt
//! fetch:
//!   max_retries: 3
//!   base_delay_ms: 500
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Terms counted as positive by the sentiment classifier.
pub const DEFAULT_POSITIVE_TERMS: &[&str] =
    &["好", "优秀", "满意", "成功", "进步", "发展", "提升", "改善"];

/// Terms counted as negative by the sentiment classifier.
pub const DEFAULT_NEGATIVE_TERMS: &[&str] =
    &["差", "问题", "困难", "失败", "下降", "恶化", "投诉", "不满"];

/// Words never returned as keywords.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "of", "is", "and", "to", "in", "that", "we", "for", "an", "are", "by", "be", "as",
    "on", "with", "can", "if", "from", "which", "you", "it", "this", "then", "at", "have", "all",
    "not", "one", "has", "or", "一个", "我们", "他们", "你们", "这个", "那个", "这些", "那些",
    "没有", "可以", "因为", "所以", "但是", "以及", "进行", "通过", "已经", "非常", "就是",
    "还是", "自己",
];

/// Source recorded on reports whose content was typed in by hand.
pub const DEFAULT_SOURCE: &str = "手动输入";

/// Full analyzer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Number of keywords kept per report.
    pub top_k: usize,
    /// Source recorded when the caller supplies none.
    pub default_source: String,
    /// Content longer than this many characters is cut before analysis.
    pub max_content_chars: usize,
    pub lexicon: LexiconConfig,
    pub stop_words: Vec<String>,
    /// Optional jieba-format IDF file (`term idf` per line). The bundled
    /// sample table is used when unset.
    pub idf_path: Option<String>,
    pub fetch: FetchConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            default_source: DEFAULT_SOURCE.to_string(),
            max_content_chars: 20_000,
            lexicon: LexiconConfig::default(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            idf_path: None,
            fetch: FetchConfig::default(),
        }
    }
}

/// Sentiment lexicon terms.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            positive: DEFAULT_POSITIVE_TERMS.iter().map(|s| s.to_string()).collect(),
            negative: DEFAULT_NEGATIVE_TERMS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Retry settings for live news fetching.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 500,
        }
    }
}

impl AnalyzerConfig {
    /// Parse a YAML document. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.top_k == 0 {
            return Err("config: top_k must be at least 1".into());
        }
        Ok(())
    }

    /// Load the configuration file at `path`, or the defaults when `path` is `None`.
    #[instrument(level = "info")]
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };
        let yaml = std::fs::read_to_string(Path::new(path))?;
        let config = Self::from_yaml(&yaml)?;
        info!(
            top_k = config.top_k,
            positive_terms = config.lexicon.positive.len(),
            negative_terms = config.lexicon.negative.len(),
            idf_path = ?config.idf_path,
            "Loaded configuration"
        );
        Ok(config)
    }
}
