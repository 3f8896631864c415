//! Inverse-document-frequency table used to rank keyword candidates.
//!
//! The file format is the one jieba ships: one `term idf` pair per line,
//! whitespace separated. Blank lines and lines starting with `#` are ignored.

use std::collections::HashMap;
use std::error::Error;
use tracing::{info, instrument};

/// Small background table bundled with the binary.
const BUNDLED_IDF: &str = include_str!("idf_sample.txt");

/// IDF used for every term when the table is empty.
pub const FALLBACK_IDF: f64 = 11.739;

#[derive(Debug, Clone, PartialEq)]
pub struct IdfTable {
    idf: HashMap<String, f64>,
    median: f64,
}

impl IdfTable {
    /// Parse a table from text.
    pub fn parse(text: &str) -> Result<Self, Box<dyn Error>> {
        let mut idf = HashMap::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let (Some(term), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(format!("idf line {}: expected `term idf`, got {:?}", lineno + 1, line).into());
            };
            let value: f64 = value
                .parse()
                .map_err(|e| format!("idf line {}: bad value {:?}: {}", lineno + 1, value, e))?;
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "idf line {}: value must be finite and non-negative, got {}",
                    lineno + 1,
                    value
                )
                .into());
            }
            idf.insert(term.to_string(), value);
        }
        Ok(Self::from_map(idf))
    }

    /// The bundled sample table.
    pub fn bundled() -> Self {
        // The bundled file is checked by the tests below.
        Self::parse(BUNDLED_IDF).unwrap_or_else(|_| Self::from_map(HashMap::new()))
    }

    /// Load a table from a jieba-format file.
    #[instrument(level = "info")]
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let text = std::fs::read_to_string(path)?;
        let table = Self::parse(&text)?;
        info!(terms = table.len(), median = table.median, "Loaded IDF table");
        Ok(table)
    }

    fn from_map(idf: HashMap<String, f64>) -> Self {
        let mut values: Vec<f64> = idf.values().copied().collect();
        values.sort_by(f64::total_cmp);
        let median = values.get(values.len() / 2).copied().unwrap_or(FALLBACK_IDF);
        Self { idf, median }
    }

    /// IDF of `term`, or the median IDF when the term is unknown.
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(self.median)
    }

    pub fn median(&self) -> f64 {
        self.median
    }

    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }
}

impl Default for IdfTable {
    fn default() -> Self {
        Self::bundled()
    }
}
