//! Batch analyzer
//!
//! Drives extension extraction, security screening and signature matching over
//! a file set. Files are processed in fixed-size chunks: members of a chunk are
//! analyzed concurrently, chunks run strictly one after another, so at most
//! `chunk_size` prefix reads are in flight at once.

use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Instant;

use sigcheck_core::{AnalysisError, AnalysisResult, FormatTag, SecurityConfig};

use crate::extension::{extension_matches, extract_extension};
use crate::handle::FileHandle;
use crate::signature;
use crate::validator::SecurityScreener;

/// Number of files analyzed concurrently
pub const CHUNK_SIZE: usize = 10;

pub struct BatchAnalyzer {
    config: Arc<SecurityConfig>,
    chunk_size: usize,
}

impl BatchAnalyzer {
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        Self {
            config,
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Override the chunk width (clamped to at least 1)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    /// Independent copy of the limits in force
    pub fn security_config(&self) -> SecurityConfig {
        self.config.snapshot()
    }

    /// Analyze a single file.
    ///
    /// Insecure files skip signature matching and report [`FormatTag::Unknown`].
    /// A read failure other than a decode fault is returned as
    /// [`AnalysisError::FileRead`].
    pub async fn analyze_one<H: FileHandle + ?Sized>(
        &self,
        file: &H,
    ) -> Result<AnalysisResult, AnalysisError> {
        let file_name = file.name();
        let file_extension = extract_extension(file_name);
        let screening =
            SecurityScreener::new(&self.config).screen(file_name, file.size(), file.type_hint());

        let detected_type = if screening.is_secure {
            signature::probe(file)
                .await
                .map_err(|e| AnalysisError::file_read(file_name, e))?
        } else {
            FormatTag::Unknown
        };

        let is_match = extension_matches(&file_extension, detected_type);

        tracing::debug!(
            file_name = %file_name,
            extension = %file_extension,
            detected_type = %detected_type,
            is_match = is_match,
            is_secure = screening.is_secure,
            "File analyzed"
        );

        Ok(AnalysisResult {
            file_name: file_name.to_string(),
            file_extension,
            detected_type,
            is_match,
            file_size: file.size(),
            is_secure: screening.is_secure,
            security_warnings: screening.warnings,
        })
    }

    /// Analyze every file, preserving input order.
    pub async fn analyze_files<H: FileHandle>(
        &self,
        files: &[H],
    ) -> Result<Vec<AnalysisResult>, AnalysisError> {
        self.analyze_files_with_progress(files, |_, _| {}).await
    }

    /// Analyze every file, calling `on_progress(completed, total)` after each chunk.
    ///
    /// Fails with [`AnalysisError::BatchTooLarge`] before any work when the batch
    /// exceeds the configured count. A read failure aborts the remaining chunks
    /// and no partial results are returned.
    #[tracing::instrument(skip_all, fields(file_count = files.len(), chunk_size = self.chunk_size))]
    pub async fn analyze_files_with_progress<H, F>(
        &self,
        files: &[H],
        mut on_progress: F,
    ) -> Result<Vec<AnalysisResult>, AnalysisError>
    where
        H: FileHandle,
        F: FnMut(usize, usize),
    {
        let total = files.len();
        if total > self.config.max_file_count {
            tracing::debug!(
                count = total,
                max = self.config.max_file_count,
                "Rejecting batch over the file count limit"
            );
            return Err(AnalysisError::BatchTooLarge {
                count: total,
                max: self.config.max_file_count,
            });
        }

        let start = Instant::now();
        let mut results = Vec::with_capacity(total);

        for chunk in files.chunks(self.chunk_size) {
            let chunk_results = try_join_all(chunk.iter().map(|file| self.analyze_one(file)))
                .await
                .map_err(|e| {
                    tracing::error!(
                        error = %e,
                        completed = results.len(),
                        total = total,
                        "Batch analysis aborted"
                    );
                    e
                })?;

            results.extend(chunk_results);
            on_progress(results.len().min(total), total);
        }

        tracing::info!(
            file_count = total,
            matched = results.iter().filter(|r| r.is_match).count(),
            insecure = results.iter().filter(|r| !r.is_secure).count(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Batch analysis complete"
        );

        Ok(results)
    }
}
