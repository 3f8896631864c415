//! Data models for news items, keywords, sentiment labels and reports.
//!
//! This module defines the core data structures used throughout the application:
//! - [`NewsItem`]: A candidate news item returned by a [`crate::sources::NewsSource`]
//! - [`Keyword`]: A ranked term with its normalized salience weight
//! - [`Sentiment`]: The coarse polarity label assigned to a text
//! - [`Analysis`]: Keywords, sentiment and a one-line summary for a text
//! - [`Report`]: An assembled report, and [`StoredReport`], its persisted shape

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A news item as returned by a news source.
///
/// Every field except `publish_time` is always present; fields the source
/// could not fill are empty strings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewsItem {
    /// Headline of the item.
    pub title: String,
    /// Short abstract shown under the headline.
    pub summary: String,
    /// Outlet or site that published the item.
    pub source: String,
    /// Absolute link to the full story.
    pub url: String,
    /// Absolute link to the cover image, or empty.
    pub cover: String,
    /// When the item was collected, `%Y-%m-%d %H:%M:%S` local time.
    pub crawl_time: String,
    /// Publication time as printed by the source, if it printed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_time: Option<String>,
}

impl NewsItem {
    /// Text handed to the analyzer for this item.
    pub fn analysis_text(&self) -> String {
        if self.summary.is_empty() {
            self.title.clone()
        } else {
            format!("{}\n{}", self.title, self.summary)
        }
    }
}

/// A keyword and its salience weight.
///
/// Serialized as a `[term, weight]` pair.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct Keyword {
    pub term: String,
    /// Normalized weight in `[0, 1]`; the top keyword of a call has weight 1.
    pub weight: f64,
}

impl From<(String, f64)> for Keyword {
    fn from((term, weight): (String, f64)) -> Self {
        Self { term, weight }
    }
}

impl From<Keyword> for (String, f64) {
    fn from(keyword: Keyword) -> Self {
        (keyword.term, keyword.weight)
    }
}

/// Coarse polarity of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Machine label: `"positive"`, `"negative"` or `"neutral"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Label shown to readers.
    pub fn display_label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "积极",
            Sentiment::Negative => "消极",
            Sentiment::Neutral => "中性",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of analyzing a piece of text without assembling a report.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Analysis {
    pub keywords: Vec<Keyword>,
    pub sentiment: Sentiment,
    /// One-line human readable summary of the analysis.
    pub summary: String,
}

/// An assembled opinion report.
///
/// Reports are produced only by [`crate::analyzer::Analyzer::generate_report`]
/// and are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Report {
    pub title: String,
    pub content: String,
    pub keywords: Vec<Keyword>,
    pub sentiment: Sentiment,
    /// Where the content came from, e.g. an outlet name or `手动输入`.
    pub source: String,
    pub report_date: NaiveDate,
    /// Reference to the user that created the report, if known.
    pub created_by: Option<String>,
}

/// The persisted shape of a [`Report`].
///
/// `keywords` holds the keyword list encoded as JSON text
/// (`[["term", weight], ...]`), mirroring a single text column.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoredReport {
    pub title: String,
    pub content: String,
    pub keywords: String,
    pub sentiment: Sentiment,
    pub source: String,
    pub report_date: NaiveDate,
    pub created_by: Option<String>,
    pub created_at: DateTime<Local>,
}

impl StoredReport {
    /// Encode a report for storage.
    pub fn from_report(
        report: &Report,
        created_at: DateTime<Local>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            title: report.title.clone(),
            content: report.content.clone(),
            keywords: serde_json::to_string(&report.keywords)?,
            sentiment: report.sentiment,
            source: report.source.clone(),
            report_date: report.report_date,
            created_by: report.created_by.clone(),
            created_at,
        })
    }

    /// Decode the keyword column back into a list.
    pub fn decoded_keywords(&self) -> Result<Vec<Keyword>, serde_json::Error> {
        if self.keywords.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&self.keywords)
    }
}
