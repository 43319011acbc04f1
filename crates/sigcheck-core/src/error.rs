//! Error types module
//!
//! Batch-level failures of the analyzer. Per-file outcomes such as an unknown
//! format, a matcher fault or a failed security screen are reported as data in
//! [`AnalysisResult`](crate::AnalysisResult), never through this enum.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like oversized batches
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the user
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "BATCH_TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same request can succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Too many files: {count} (max: {max})")]
    BatchTooLarge { count: usize, max: usize },

    #[error("Failed to read {file_name}: {source}")]
    FileRead {
        file_name: String,
        #[source]
        source: io::Error,
    },
}

impl AnalysisError {
    pub fn file_read(file_name: impl Into<String>, source: io::Error) -> Self {
        AnalysisError::FileRead {
            file_name: file_name.into(),
            source,
        }
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn analysis_error_static_metadata(
    err: &AnalysisError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AnalysisError::BatchTooLarge { .. } => (
            "BATCH_TOO_LARGE",
            false,
            Some("Reduce the number of files and try again"),
            LogLevel::Debug,
        ),
        AnalysisError::FileRead { .. } => (
            "FILE_READ_FAILED",
            true,
            Some("Check that the files are still readable, or try fewer files"),
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for AnalysisError {
    fn error_code(&self) -> &'static str {
        analysis_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        analysis_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        analysis_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        analysis_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AnalysisError::BatchTooLarge { count, max } => {
                format!("Too many files selected ({} > {})", count, max)
            }
            AnalysisError::FileRead { file_name, .. } => {
                format!("Analysis failed while reading {}", file_name)
            }
        }
    }
}
