//! TF-IDF keyword extraction over jieba word segmentation.
//!
//! Chinese prose has no whitespace between words, so the text is first cut
//! into words with [`jieba_rs`]. Each surviving candidate is scored
//! `(count / total) * idf(term)` and the best `top_k` are returned with
//! weights normalized against the top score.
//!
//! Equal scores keep the order in which the terms first appear in the text.

use super::idf::IdfTable;
use crate::models::Keyword;
use jieba_rs::Jieba;
use std::collections::{HashMap, HashSet};

/// Keyword extractor holding the segmentation dictionary and IDF table.
///
/// Immutable once built and safe to share between threads.
pub struct KeywordExtractor {
    jieba: Jieba,
    idf: IdfTable,
    stop_words: HashSet<String>,
}

impl std::fmt::Debug for KeywordExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordExtractor")
            .field("idf_terms", &self.idf.len())
            .field("stop_words", &self.stop_words.len())
            .finish()
    }
}

impl KeywordExtractor {
    pub fn new<I, S>(idf: IdfTable, stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            jieba: Jieba::new(),
            idf,
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Segment `text` into words.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.jieba.cut(text, true)
    }

    fn is_candidate(&self, word: &str) -> bool {
        word.chars().count() >= 2
            && word.chars().any(char::is_alphanumeric)
            && !self.stop_words.contains(&word.to_lowercase())
    }

    /// Extract at most `top_k` keywords from `text`, best first.
    pub fn extract(&self, text: &str, top_k: usize) -> Vec<Keyword> {
        if top_k == 0 || text.trim().is_empty() {
            return Vec::new();
        }

        // Terms in first-occurrence order with their counts.
        let mut order: Vec<(&str, usize)> = Vec::new();
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut total = 0usize;
        for word in self.segment(text) {
            let word = word.trim();
            if !self.is_candidate(word) {
                continue;
            }
            total += 1;
            match position.get(word) {
                Some(&i) => order[i].1 += 1,
                None => {
                    position.insert(word, order.len());
                    order.push((word, 1));
                }
            }
        }
        if total == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(&str, f64)> = order
            .into_iter()
            .map(|(term, count)| (term, count as f64 / total as f64 * self.idf.idf(term)))
            .collect();
        // Stable sort: ties stay in first-occurrence order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);

        let max = scored.first().map(|(_, s)| *s).unwrap_or(0.0);
        scored
            .into_iter()
            .map(|(term, score)| Keyword {
                term: term.to_string(),
                weight: if max > 0.0 { (score / max).clamp(0.0, 1.0) } else { 0.0 },
            })
            .collect()
    }
}
