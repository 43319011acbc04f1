//! Configuration module
//!
//! Security limits consulted by the screener and the batch analyzer. The
//! configuration is built once at startup and handed out by reference; nothing
//! reads it from ambient global state.

use serde::Serialize;
use std::env;

// Common constants
const MAX_FILE_SIZE_MB: u64 = 50;
const MAX_FILE_COUNT: usize = 1000;

const DEFAULT_ALLOWED_MIME_TYPES: &str = "image/jpeg,image/png,image/gif,image/bmp,image/webp,\
image/svg+xml,image/tiff,image/x-icon,image/vnd.microsoft.icon";
const DEFAULT_ALLOWED_EXTENSIONS: &str = "jpg,jpeg,png,gif,bmp,webp,svg,tiff,tif,ico";

/// Process-wide security limits
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityConfig {
    /// Largest single file, in bytes, that is still screened as secure
    pub max_file_size: u64,
    /// Largest number of files accepted in one batch
    pub max_file_count: usize,
    pub allowed_mime_types: Vec<String>,
    pub allowed_extensions: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE_MB * 1024 * 1024,
            max_file_count: MAX_FILE_COUNT,
            allowed_mime_types: split_list(DEFAULT_ALLOWED_MIME_TYPES),
            allowed_extensions: split_list(DEFAULT_ALLOWED_EXTENSIONS),
        }
    }
}

impl SecurityConfig {
    /// Load the configuration from the environment (and `.env` if present).
    ///
    /// Recognised variables:
    /// - `SIGCHECK_MAX_FILE_SIZE_MB`
    /// - `SIGCHECK_MAX_FILE_COUNT`
    /// - `SIGCHECK_ALLOWED_MIME_TYPES` (comma separated)
    /// - `SIGCHECK_ALLOWED_EXTENSIONS` (comma separated)
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Missing or unparsable values fall back to the built-in defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_file_size_mb = lookup("SIGCHECK_MAX_FILE_SIZE_MB")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);

        let max_file_count = lookup("SIGCHECK_MAX_FILE_COUNT")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(MAX_FILE_COUNT);

        let allowed_mime_types = split_list(
            &lookup("SIGCHECK_ALLOWED_MIME_TYPES")
                .unwrap_or_else(|| DEFAULT_ALLOWED_MIME_TYPES.to_string()),
        );

        let allowed_extensions = split_list(
            &lookup("SIGCHECK_ALLOWED_EXTENSIONS")
                .unwrap_or_else(|| DEFAULT_ALLOWED_EXTENSIONS.to_string()),
        );

        let config = SecurityConfig {
            max_file_size: max_file_size_mb.saturating_mul(1024 * 1024),
            max_file_count,
            allowed_mime_types,
            allowed_extensions,
        };

        config.validate()?;

        tracing::debug!(
            max_file_size = config.max_file_size,
            max_file_count = config.max_file_count,
            allowed_extensions = ?config.allowed_extensions,
            "Security configuration loaded"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size == 0 {
            return Err(anyhow::anyhow!(
                "SIGCHECK_MAX_FILE_SIZE_MB must be greater than zero"
            ));
        }

        if self.max_file_count == 0 {
            return Err(anyhow::anyhow!(
                "SIGCHECK_MAX_FILE_COUNT must be greater than zero"
            ));
        }

        if self.allowed_mime_types.is_empty() {
            return Err(anyhow::anyhow!(
                "SIGCHECK_ALLOWED_MIME_TYPES must list at least one content type"
            ));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "SIGCHECK_ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        Ok(())
    }

    /// Read-only snapshot for collaborators that want to display or pre-filter
    /// against the limits. The returned value is an independent copy.
    pub fn snapshot(&self) -> SecurityConfig {
        self.clone()
    }

    /// Limit expressed in whole MiB, as shown in warnings.
    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size / (1024 * 1024)
    }

    pub fn is_extension_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|e| e == extension)
    }

    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|m| m == mime_type)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
