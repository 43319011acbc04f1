//! Domain models

pub mod analysis;
pub mod format;

pub use analysis::{format_file_size, AnalysisResult, BatchSummary};
pub use format::FormatTag;
