//! Sigcheck Core Library
//!
//! This crate provides the domain models, error types and security configuration
//! shared by the signature matcher, the batch analyzer and the CLI.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::SecurityConfig;
pub use error::{AnalysisError, ErrorMetadata, LogLevel};
pub use models::{format_file_size, AnalysisResult, BatchSummary, FormatTag};
