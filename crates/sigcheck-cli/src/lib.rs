use std::fmt::Write as _;
use std::path::PathBuf;

use sigcheck_core::{
    format_file_size, AnalysisError, AnalysisResult, BatchSummary, ErrorMetadata, LogLevel,
};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries. Logs go to stderr so stdout stays
/// parseable when printing JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Expand the given paths into a sorted list of regular files.
///
/// Directories contribute their direct children, or their whole subtree when
/// `recursive` is set.
pub async fn collect_files(paths: &[PathBuf], recursive: bool) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| anyhow::anyhow!("Cannot access {}: {}", path.display(), e))?;

        if !metadata.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut pending = vec![path.clone()];
        let mut found = Vec::new();
        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .map_err(|e| anyhow::anyhow!("Cannot read directory {}: {}", dir.display(), e))?;

            while let Some(entry) = entries.next_entry().await? {
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    if recursive {
                        pending.push(entry.path());
                    }
                } else if file_type.is_file() {
                    found.push(entry.path());
                }
            }
        }

        found.sort();
        files.extend(found);
    }

    Ok(files)
}

/// Render results and summary as a plain-text table.
pub fn render_table(results: &[AnalysisResult], summary: &BatchSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<40} {:<8} {:<8} {:<9} {:>10}  {}",
        "FILE", "EXT", "DETECTED", "MATCH", "SIZE", "SECURITY"
    );

    for result in results {
        let extension = if result.file_extension.is_empty() {
            "-".to_string()
        } else {
            format!(".{}", result.file_extension)
        };
        let security = if result.is_secure {
            "ok".to_string()
        } else {
            result.security_warnings.join("; ")
        };

        let _ = writeln!(
            out,
            "{:<40} {:<8} {:<8} {:<9} {:>10}  {}",
            truncate_string(&result.file_name, 40),
            truncate_string(&extension, 8),
            result.detected_type.display_name(),
            if result.is_match { "match" } else { "MISMATCH" },
            format_file_size(result.file_size),
            security
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Total: {}  Matched: {}  Mismatched: {}  Insecure: {}",
        summary.total, summary.matched, summary.mismatched, summary.insecure
    );

    if !summary.by_type.is_empty() {
        let breakdown: Vec<String> = summary
            .by_type
            .iter()
            .map(|(tag, count)| format!("{}: {}", tag.display_name(), count))
            .collect();
        let _ = writeln!(out, "Detected: {}", breakdown.join(", "));
    }

    out
}

/// Log a batch failure at its level and return the message to show the user.
pub fn report_analysis_error(err: &AnalysisError) -> String {
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(error = %err, code = err.error_code(), "Analysis failed"),
        LogLevel::Warn => tracing::warn!(error = %err, code = err.error_code(), "Analysis failed"),
        LogLevel::Error => tracing::error!(error = %err, code = err.error_code(), "Analysis failed"),
    }

    match err.suggested_action() {
        Some(action) => format!("{}. {}", err.client_message(), action),
        None => err.client_message(),
    }
}
