use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::format::FormatTag;

/// Outcome of analyzing a single file. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub file_name: String,
    /// Lowercase suffix after the last `.`, or empty
    pub file_extension: String,
    pub detected_type: FormatTag,
    pub is_match: bool,
    pub file_size: u64,
    pub is_secure: bool,
    pub security_warnings: Vec<String>,
}

/// Aggregate counts over a finished batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub insecure: usize,
    pub by_type: BTreeMap<FormatTag, usize>,
}

impl BatchSummary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let mut summary = BatchSummary {
            total: results.len(),
            ..Default::default()
        };

        for result in results {
            if result.is_match {
                summary.matched += 1;
            }
            if !result.is_secure {
                summary.insecure += 1;
            }
            *summary.by_type.entry(result.detected_type).or_insert(0) += 1;
        }

        summary.mismatched = summary.total - summary.matched;
        summary
    }
}

/// Format a byte count with binary units, e.g. `1536` -> `"1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
