//! sigcheck — report image files whose extension disagrees with their content.
//!
//! Limits come from SIGCHECK_* environment variables (or a .env file).

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use sigcheck_cli::{collect_files, init_tracing, render_table, report_analysis_error};
use sigcheck_core::{AnalysisResult, BatchSummary, SecurityConfig};
use sigcheck_processing::{BatchAnalyzer, LocalFile};

#[derive(Parser)]
#[command(
    name = "sigcheck",
    about = "Check image file extensions against their magic bytes"
)]
struct Cli {
    /// Files or directories to analyze
    #[arg(required_unless_present = "show_config")]
    paths: Vec<PathBuf>,
    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,
    /// Analyze only the first files up to the batch limit instead of failing
    #[arg(long)]
    truncate: bool,
    /// Print results as JSON
    #[arg(long)]
    json: bool,
    /// Print the security limits in force and exit
    #[arg(long)]
    show_config: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    summary: &'a BatchSummary,
    results: &'a [AnalysisResult],
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Arc::new(SecurityConfig::from_env().context("Invalid security configuration")?);

    if cli.show_config {
        return print_json(&config.snapshot());
    }

    let mut paths = collect_files(&cli.paths, cli.recursive).await?;

    if cli.truncate && paths.len() > config.max_file_count {
        tracing::warn!(
            found = paths.len(),
            max = config.max_file_count,
            "Too many files, analyzing only the first {}",
            config.max_file_count
        );
        paths.truncate(config.max_file_count);
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let file = LocalFile::open(path)
            .await
            .with_context(|| format!("Failed to open {}", path.display()))?;
        files.push(file);
    }

    let analyzer = BatchAnalyzer::new(config);
    let outcome = analyzer
        .analyze_files_with_progress(&files, |done, total| {
            eprintln!("Analyzed {}/{} files", done, total);
        })
        .await;

    let results = match outcome {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Error: {}", report_analysis_error(&e));
            std::process::exit(1);
        }
    };

    let summary = BatchSummary::from_results(&results);

    if cli.json {
        print_json(&Report {
            summary: &summary,
            results: &results,
        })?;
    } else {
        print!("{}", render_table(&results, &summary));
    }

    Ok(())
}
