//! File name extension helpers

use sigcheck_core::FormatTag;

/// Lowercased substring after the last `.` of `file_name`, or empty when the
/// name has no dot or ends with one.
pub fn extract_extension(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) => file_name[idx + 1..].to_lowercase(),
        None => String::new(),
    }
}

/// Map extension aliases onto the canonical format tag name (`jpg` -> `jpeg`).
pub fn normalize_extension(extension: &str) -> &str {
    match extension {
        "jpg" => "jpeg",
        other => other,
    }
}

/// Literal comparison of the normalized extension against the detected tag.
/// An empty extension never matches.
pub fn extension_matches(extension: &str, detected: FormatTag) -> bool {
    normalize_extension(extension) == detected.as_str()
}
