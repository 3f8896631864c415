//! Lexicon-based sentiment classification.

use crate::config::LexiconConfig;
use crate::models::Sentiment;

/// Fixed positive and negative term lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl Lexicon {
    pub fn new(positive: Vec<String>, negative: Vec<String>) -> Self {
        // An empty term would match everywhere.
        let keep = |terms: Vec<String>| -> Vec<String> {
            terms.into_iter().filter(|t| !t.is_empty()).collect()
        };
        Self {
            positive: keep(positive),
            negative: keep(negative),
        }
    }

    /// Total non-overlapping occurrences of every term in `terms`.
    fn count(terms: &[String], text: &str) -> usize {
        terms.iter().map(|term| text.matches(term.as_str()).count()).sum()
    }

    /// Positive and negative occurrence counts for `text`.
    pub fn counts(&self, text: &str) -> (usize, usize) {
        (
            Self::count(&self.positive, text),
            Self::count(&self.negative, text),
        )
    }

    pub fn classify(&self, text: &str) -> Sentiment {
        let (positive, negative) = self.counts(text);
        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}

impl From<&LexiconConfig> for Lexicon {
    fn from(config: &LexiconConfig) -> Self {
        Self::new(config.positive.clone(), config.negative.clone())
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::from(&LexiconConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_without_lexicon_terms() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.classify(""), Sentiment::Neutral);
        assert_eq!(lexicon.classify("今天天气晴朗"), Sentiment::Neutral);
        assert_eq!(lexicon.classify("plain english text"), Sentiment::Neutral);
    }

    #[test]
    fn test_every_occurrence_counts() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.counts("成功 成功 投诉"), (2, 1));
        assert_eq!(lexicon.classify("成功 成功 投诉"), Sentiment::Positive);
    }

    #[test]
    fn test_equal_counts_are_neutral() {
        assert_eq!(Lexicon::default().classify("问题 成功"), Sentiment::Neutral);
    }

    #[test]
    fn test_negative_majority() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.classify("用户投诉增多，服务质量下降"), Sentiment::Negative);
    }

    #[test]
    fn test_substring_containment() {
        let lexicon = Lexicon::new(vec!["改善".into()], vec![]);
        assert_eq!(lexicon.counts("环境明显改善了，持续改善中"), (2, 0));
    }

    #[test]
    fn test_empty_terms_ignored() {
        let lexicon = Lexicon::new(vec![String::new()], vec!["差".into()]);
        assert_eq!(lexicon.classify("质量差"), Sentiment::Negative);
    }
}
