//! # Opinion Report
//!
//! Turns short Chinese news text into opinion reports: a ranked keyword list
//! with salience weights, a coarse sentiment label, and the caller-supplied
//! metadata, persisted as JSON.
//!
//! ## Features
//!
//! - Keyword extraction via jieba word segmentation and TF-IDF ranking
//! - Lexicon-based sentiment labelling (positive / negative / neutral)
//! - Report assembly and JSON persistence
//! - News search through a replaceable source adapter (canned data or Baidu News)
//!
//! ## Usage
//!
//! ```sh
//! opinion_report analyze --content "服务质量明显改善"
//! opinion_report report -t "乡村振兴" -f article.txt -j ./reports
//! opinion_report search 西昌 -j ./reports -m ./digest.md
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: lexicon, stop words and IDF table are loaded once
//! 2. **Input**: text from flags, files or stdin, or news items from a source
//! 3. **Analysis**: keywords + sentiment per text (parallel for searches)
//! 4. **Output**: analysis or reports on stdout, JSON files and Markdown digest

use clap::Parser;
use futures::stream::{self, StreamExt};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::io::AsyncReadExt;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::{AnalyzeArgs, Cli, Command, ContentArgs, ReportArgs, SearchArgs};
use opinion_report::analyzer::Analyzer;
use opinion_report::config::AnalyzerConfig;
use opinion_report::fetch::{HttpFetcher, RetryFetch};
use opinion_report::models::Report;
use opinion_report::outputs::{json, markdown};
use opinion_report::sources::Crawler;
use opinion_report::sources::baidu::BaiduNewsSource;
use opinion_report::utils::{ensure_writable_dir, truncate_chars, truncate_for_log};

/// Items analyzed concurrently during a search.
const PARALLEL_BATCH_SIZE: usize = 8;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("opinion_report starting up");

    let args = Cli::parse();
    debug!(?args.config, "Parsed CLI arguments");

    let config = AnalyzerConfig::load(args.config.as_deref()).inspect_err(|e| {
        error!(error = %e, "Failed to load configuration");
    })?;
    let analyzer = Arc::new(Analyzer::from_config(&config).inspect_err(|e| {
        error!(error = %e, "Failed to build analyzer");
    })?);

    let result = match args.command {
        Command::Analyze(cmd) => run_analyze(&analyzer, &config, cmd).await,
        Command::Report(cmd) => run_report(&analyzer, &config, cmd).await,
        Command::Search(cmd) => run_search(analyzer, &config, cmd).await,
    };

    let elapsed = start_time.elapsed();
    match &result {
        Ok(()) => info!(?elapsed, millis = elapsed.as_millis(), "Execution complete"),
        Err(e) => error!(?elapsed, error = %e, "Execution failed"),
    }
    result
}

/// Read the text named by `input`: inline, from a file, or from stdin.
/// Text longer than the configured cap is cut.
async fn read_content(input: &ContentArgs, config: &AnalyzerConfig) -> Result<String, Box<dyn Error>> {
    let content = match (&input.content, &input.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path).await?,
        (None, None) => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            text
        }
    };
    Ok(cap_content(content, config.max_content_chars))
}

/// Reject blank input before any analysis happens.
fn require_text(field: &str, text: &str) -> Result<(), Box<dyn Error>> {
    if text.trim().is_empty() {
        return Err(format!("{} must not be empty", field).into());
    }
    Ok(())
}

fn cap_content(content: String, max_chars: usize) -> String {
    match truncate_chars(&content, max_chars) {
        (_, false) => content,
        (head, true) => {
            warn!(max_chars, bytes = content.len(), "Content too long; truncating before analysis");
            head.to_string()
        }
    }
}

#[instrument(level = "info", skip_all)]
async fn run_analyze(
    analyzer: &Analyzer,
    config: &AnalyzerConfig,
    cmd: AnalyzeArgs,
) -> Result<(), Box<dyn Error>> {
    let content = read_content(&cmd.input, config).await?;
    require_text("content", &content)?;
    let top_k = cmd.top_k.map_or(analyzer.top_k(), |k| k as usize);

    let analysis = analyzer.analyze(&content, top_k);
    info!(
        keywords = analysis.keywords.len(),
        sentiment = %analysis.sentiment,
        content_preview = %truncate_for_log(&content, 40),
        "Analysis complete"
    );

    if let Some(path) = &cmd.output {
        json::write_analysis(&analysis, path).await?;
    }
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

#[instrument(level = "info", skip_all, fields(title = %cmd.title))]
async fn run_report(
    analyzer: &Analyzer,
    config: &AnalyzerConfig,
    cmd: ReportArgs,
) -> Result<(), Box<dyn Error>> {
    let content = read_content(&cmd.input, config).await?;
    require_text("title", &cmd.title)?;
    require_text("content", &content)?;

    ensure_writable_dir(&cmd.json_output_dir).await?;
    let report = analyzer.generate_report(
        &cmd.title,
        &content,
        cmd.source.as_deref(),
        cmd.created_by.as_deref(),
    );
    let path = json::write_report(&report, &cmd.json_output_dir).await?;
    info!(
        path = %path.display(),
        keywords = report.keywords.len(),
        sentiment = %report.sentiment,
        "Report generated"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[instrument(level = "info", skip_all, fields(keyword = %cmd.keyword, limit = cmd.limit, live = cmd.live))]
async fn run_search(
    analyzer: Arc<Analyzer>,
    config: &AnalyzerConfig,
    cmd: SearchArgs,
) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = &cmd.json_output_dir {
        ensure_writable_dir(dir).await?;
    }

    let live = if cmd.live {
        let fetcher = RetryFetch::new(
            HttpFetcher::new()?,
            config.fetch.max_retries,
            StdDuration::from_millis(config.fetch.base_delay_ms),
        );
        Some(BaiduNewsSource::new(fetcher))
    } else {
        None
    };
    let crawler = Crawler::new(live);
    let items = crawler.search(&cmd.keyword, cmd.limit as usize).await;
    info!(count = items.len(), "News items to analyze");

    // Analysis is CPU-bound; run it on the blocking pool, keeping item order.
    let max_chars = config.max_content_chars;
    let reports: Vec<Report> = stream::iter(items.into_iter().enumerate())
        .map(|(i, item)| {
            let analyzer = Arc::clone(&analyzer);
            async move {
                let task = tokio::task::spawn_blocking(move || {
                    let content = cap_content(item.analysis_text(), max_chars);
                    let source = (!item.source.is_empty()).then_some(item.source.as_str());
                    analyzer.generate_report(&item.title, &content, source, None)
                });
                match task.await {
                    Ok(report) => {
                        debug!(index = i, title = %report.title, "Analyzed news item");
                        Some(report)
                    }
                    Err(e) => {
                        error!(index = i, error = %e, "Analysis task failed; skipping item");
                        None
                    }
                }
            }
        })
        .buffered(PARALLEL_BATCH_SIZE)
        .filter_map(std::future::ready)
        .collect()
        .await;

    if let Some(dir) = &cmd.json_output_dir {
        for report in &reports {
            if let Err(e) = json::write_report(report, dir).await {
                error!(title = %report.title, error = %e, "Failed to write report JSON");
            }
        }
    }

    if let Some(path) = &cmd.markdown_output {
        let md = markdown::reports_to_markdown(&cmd.keyword, &reports);
        tokio::fs::write(path, md).await?;
        info!(%path, "Wrote Markdown digest");
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_blank_input() {
        assert!(require_text("content", "服务质量明显改善").is_ok());
        for blank in ["", "  ", "\n\t"] {
            let err = require_text("content", blank).unwrap_err();
            assert_eq!(err.to_string(), "content must not be empty");
        }
    }

    #[test]
    fn test_cap_content() {
        assert_eq!(cap_content("成功发射".to_string(), 10), "成功发射");
        assert_eq!(cap_content("成功发射".to_string(), 2), "成功");
    }
}
