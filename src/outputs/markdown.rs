//! Markdown digest of generated reports.

use crate::models::{Report, Sentiment};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Render `reports` for `keyword`, grouped by sentiment.
///
/// ```text
/// # 舆情摘要：西昌
///
/// ## 积极 (2)
///
/// ### 西昌卫星发射中心成功发射新型通信卫星
/// *新华社 · 2025-05-06*
///
/// 关键词：卫星 (1.00)、发射 (0.80)
/// ```
pub fn reports_to_markdown(keyword: &str, reports: &[Report]) -> String {
    let mut md = String::new();
    writeln!(md, "# 舆情摘要：{}\n", keyword).unwrap();

    if reports.is_empty() {
        writeln!(md, "_没有找到相关新闻。_").unwrap();
        return md;
    }

    let mut by_sentiment: BTreeMap<Sentiment, Vec<&Report>> = BTreeMap::new();
    for report in reports {
        by_sentiment.entry(report.sentiment).or_default().push(report);
    }

    for (sentiment, group) in by_sentiment {
        writeln!(md, "## {} ({})\n", sentiment.display_label(), group.len()).unwrap();
        for report in group {
            writeln!(md, "### {}", report.title).unwrap();
            writeln!(md, "*{} · {}*\n", report.source, report.report_date).unwrap();
            if !report.keywords.is_empty() {
                let keywords = report
                    .keywords
                    .iter()
                    .map(|k| format!("{} ({:.2})", k.term, k.weight))
                    .collect::<Vec<_>>()
                    .join("、");
                writeln!(md, "关键词：{}\n", keywords).unwrap();
            }
            if !report.content.is_empty() {
                writeln!(md, "> {}\n", report.content.replace('\n', "\n> ")).unwrap();
            }
        }
    }
    md
}
