//! Command-line interface definitions for Opinion Report.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The configuration path can also be provided via an environment variable.

use clap::{Args, Parser, Subcommand};

/// Command-line arguments for the Opinion Report application.
///
/// # Examples
///
/// ```sh
/// # Analyze text from stdin
/// echo "服务质量明显改善，用户满意度提升" | opinion_report analyze
///
/// # Generate and store a report
/// opinion_report report -t "乡村振兴" -f article.txt -j ./reports
///
/// # Search canned or live news and analyze every item
/// opinion_report search 西昌 -n 5 -j ./reports -m ./digest.md
/// opinion_report search 新能源 --live
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML configuration file
    #[arg(short, long, env = "OPINION_REPORT_CONFIG", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract keywords and sentiment from text and print the analysis
    Analyze(AnalyzeArgs),
    /// Generate a report from text and store it as JSON
    Report(ReportArgs),
    /// Search news for a keyword and generate a report per item
    Search(SearchArgs),
}

/// Where to read the text from. Defaults to stdin.
#[derive(Args, Debug)]
pub struct ContentArgs {
    /// Text to analyze
    #[arg(long, conflicts_with = "file")]
    pub content: Option<String>,

    /// File containing the text to analyze
    #[arg(short, long)]
    pub file: Option<String>,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: ContentArgs,

    /// Number of keywords to extract (defaults to the configured value)
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub top_k: Option<u32>,

    /// Also write the analysis JSON to this file
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Report title
    #[arg(short, long)]
    pub title: String,

    #[command(flatten)]
    pub input: ContentArgs,

    /// Where the content came from (defaults to the configured source)
    #[arg(short, long)]
    pub source: Option<String>,

    /// User the report is attributed to
    #[arg(long, env = "USER")]
    pub created_by: Option<String>,

    /// Output directory for report JSON files
    #[arg(short, long)]
    pub json_output_dir: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search keyword
    pub keyword: String,

    /// Maximum number of news items
    #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// Query Baidu News when no canned data exists for the keyword
    #[arg(long)]
    pub live: bool,

    /// Output directory for report JSON files
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Write a Markdown digest to this file
    #[arg(short, long)]
    pub markdown_output: Option<String>,
}
