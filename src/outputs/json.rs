//! JSON persistence for reports and analysis results.
//!
//! Reports are written once and never overwritten: when a file with the same
//! slug already exists for the day, a numeric suffix is appended.

use crate::models::{Analysis, Report, StoredReport};
use crate::utils::slugify_title;
use chrono::Local;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`Report`] under `{json_output_dir}/{report_date}/{slug}.json`.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, title = %report.title))]
pub async fn write_report(
    report: &Report,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let stored = StoredReport::from_report(report, Local::now())?;
    let json = serde_json::to_string_pretty(&stored)?;

    let full_json_dir = Path::new(json_output_dir).join(report.report_date.to_string());
    info!(dir = %full_json_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(dir = %full_json_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = unused_path(&full_json_dir, &slugify_title(&report.title)).await;
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote report JSON");
    Ok(path)
}

/// First of `{slug}.json`, `{slug}-2.json`, ... that does not exist yet.
async fn unused_path(dir: &Path, slug: &str) -> PathBuf {
    let slug = if slug.is_empty() { "report" } else { slug };
    let mut candidate = dir.join(format!("{}.json", slug));
    let mut n = 2;
    while fs::try_exists(&candidate).await.unwrap_or(false) {
        candidate = dir.join(format!("{}-{}.json", slug, n));
        n += 1;
    }
    candidate
}

/// Write an [`Analysis`] as pretty JSON to `path`.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_analysis(analysis: &Analysis, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(analysis)?;
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, json).await?;
    info!("Wrote analysis JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Keyword, Sentiment};
    use chrono::NaiveDate;

    fn report(title: &str) -> Report {
        Report {
            title: title.to_string(),
            content: "西昌卫星发射成功".to_string(),
            keywords: vec![Keyword { term: "卫星".to_string(), weight: 1.0 }],
            sentiment: Sentiment::Positive,
            source: "新华社".to_string(),
            report_date: NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_write_report_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();

        let path = write_report(&report("卫星 发射"), dir).await.unwrap();
        assert_eq!(path, tmp.path().join("2025-05-06").join("卫星-发射.json"));

        let stored: StoredReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored.title, "卫星 发射");
        assert_eq!(stored.keywords, r#"[["卫星",1.0]]"#);
        assert_eq!(stored.sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_write_report_never_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();

        let first = write_report(&report("同名"), dir).await.unwrap();
        let second = write_report(&report("同名"), dir).await.unwrap();
        let third = write_report(&report("！！"), dir).await.unwrap();
        assert_ne!(first, second);
        assert!(second.ends_with("同名-2.json"));
        assert!(third.ends_with("report.json"));
    }

    #[tokio::test]
    async fn test_write_analysis() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out/analysis.json");
        let analysis = Analysis {
            keywords: vec![],
            sentiment: Sentiment::Neutral,
            summary: "分析完成，共提取0个关键词，情感倾向为中性。".to_string(),
        };
        write_analysis(&analysis, path.to_str().unwrap()).await.unwrap();
        let back: Analysis = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, analysis);
    }
}
