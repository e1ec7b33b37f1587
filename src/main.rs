use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use textdelta::{
    compare, load_file, render_json, render_spans, render_summary, validate_matching_types,
    ChangeCounts, ComparisonInput, RenderConfig, SourceConfig, Span, SourceKind, TextStats,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "textdelta")]
#[command(about = "Token-level text comparison with strict and formatting-insensitive modes")]
#[command(version)]
struct Args {
    /// Original input: a file path, or literal text with --literal
    original: String,

    /// Modified input: a file path, or literal text with --literal
    modified: String,

    /// Treat the inputs as literal text instead of file paths
    #[arg(long)]
    literal: bool,

    /// Ignore case and whitespace when comparing
    #[arg(long)]
    ignore_formatting: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable ANSI colors; changes are wrapped in [-...-] / {+...+} markers
    #[arg(long)]
    no_color: bool,

    /// Print per-input character/word/line statistics
    #[arg(long)]
    stats: bool,

    /// Maximum file input size in bytes (0 = unlimited)
    #[arg(long, default_value_t = 16 * 1024 * 1024)]
    max_bytes: u64,

    /// Write a JSON run report to this path
    #[arg(long)]
    report_out: Option<PathBuf>,
}

/// Per-input section of the JSON run report
#[derive(Serialize, Debug)]
struct InputReport {
    label: String,
    kind: SourceKind,
    stats: TextStats,
}

/// JSON run report written by --report-out
#[derive(Serialize, Debug)]
struct RunReport {
    ignore_formatting: bool,
    original: InputReport,
    modified: InputReport,
    counts: ChangeCounts,
    spans: Vec<Span>,
}

impl InputReport {
    fn new(input: &ComparisonInput) -> Self {
        Self {
            label: input.label.clone(),
            kind: input.kind,
            stats: TextStats::measure(&input.content),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging enables observability and debugging in production
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting textdelta");
    info!(?args, "Parsed CLI arguments");

    // Both inputs must be fully loaded (or failed) before the comparator runs
    let (original, modified) = if args.literal {
        (
            ComparisonInput::from_text("original", args.original.clone()),
            ComparisonInput::from_text("modified", args.modified.clone()),
        )
    } else {
        let config = SourceConfig {
            max_bytes: args.max_bytes,
        };
        let original = load_file(&args.original, &config).await?;
        let modified = load_file(&args.modified, &config).await?;
        (original, modified)
    };

    validate_matching_types(&original, &modified)?;

    info!(
        original = %original.label,
        modified = %modified.label,
        ignore_formatting = args.ignore_formatting,
        "Inputs loaded, running comparison"
    );

    let spans = compare(&original.content, &modified.content, args.ignore_formatting);
    let counts = ChangeCounts::from_spans(&spans);

    info!(
        spans = spans.len(),
        added = counts.added,
        removed = counts.removed,
        "Comparison complete"
    );

    match args.format {
        OutputFormat::Json => {
            println!("{}", render_json(&spans)?);
        }
        OutputFormat::Text => {
            if args.stats {
                for input in [&original, &modified] {
                    let stats = TextStats::measure(&input.content);
                    println!(
                        "{}: {} characters, {} words, {} lines",
                        input.label, stats.characters, stats.words, stats.lines
                    );
                }
            }

            let render_config = RenderConfig {
                color: !args.no_color,
                markers: args.no_color,
            };
            println!("{}", render_spans(&spans, &render_config));
            println!("{}", render_summary(&counts));
        }
    }

    if let Some(report_path) = &args.report_out {
        let report = RunReport {
            ignore_formatting: args.ignore_formatting,
            original: InputReport::new(&original),
            modified: InputReport::new(&modified),
            counts,
            spans,
        };
        let json = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(report_path, json).await?;
        info!("Run report written to {}", report_path.display());
    }

    Ok(())
}
