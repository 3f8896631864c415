//! Keyword, sentiment and report generation for short Chinese news text.
//!
//! - [`analyzer`]: keyword extraction, sentiment classification, report assembly
//! - [`sources`]: news search behind a replaceable adapter
//! - [`outputs`]: JSON persistence and Markdown digests
//!
//! ```ignore
//! use opinion_report::analyzer;
//!
//! let report = analyzer::generate_report("乡村振兴", "农业发展取得显著成效", None);
//! println!("{} {:?}", report.sentiment, report.keywords);
//! ```

pub mod analyzer;
pub mod config;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod sources;
pub mod utils;
