//! Sigcheck processing
//!
//! File-type detection and batch analysis: extension extraction, security
//! screening, magic-byte signature matching and the chunked batch analyzer.

pub mod analyzer;
pub mod extension;
pub mod handle;
pub mod signature;
pub mod validator;

pub use analyzer::{BatchAnalyzer, CHUNK_SIZE};
pub use extension::{extension_matches, extract_extension, normalize_extension};
pub use handle::{content_type_for_extension, FileHandle, LocalFile, MemoryFile};
pub use signature::{detect_file_type, detect_type, PREFIX_LEN};
pub use validator::{ScreeningError, ScreeningOutcome, SecurityScreener};
