use sigcheck_core::SecurityConfig;

use crate::extension::extract_extension;

/// Reasons a file fails security screening
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScreeningError {
    #[error("File too large ({size_mb:.2}MB > {max_mb}MB)", size_mb = bytes_to_mb(.size))]
    FileTooLarge { size: u64, max_mb: u64 },

    #[error("File name contains invalid characters")]
    InvalidFileName,

    #[error("Unsupported extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Unsupported MIME type: {0}")]
    UnsupportedMimeType(String),
}

fn bytes_to_mb(bytes: &u64) -> f64 {
    *bytes as f64 / 1024.0 / 1024.0
}

/// Result of screening one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningOutcome {
    pub is_secure: bool,
    pub warnings: Vec<String>,
}

/// Security screener
///
/// Checks a file's size, name, extension and declared content type against the
/// shared [`SecurityConfig`]. Pure: no I/O, the file's bytes are never touched.
pub struct SecurityScreener<'a> {
    config: &'a SecurityConfig,
}

impl<'a> SecurityScreener<'a> {
    pub fn new(config: &'a SecurityConfig) -> Self {
        Self { config }
    }

    /// Validate file size
    pub fn check_file_size(&self, size: u64) -> Result<(), ScreeningError> {
        if size > self.config.max_file_size {
            return Err(ScreeningError::FileTooLarge {
                size,
                max_mb: self.config.max_file_size_mb(),
            });
        }

        Ok(())
    }

    /// Reject names that could be used for path traversal
    pub fn check_file_name(&self, file_name: &str) -> Result<(), ScreeningError> {
        if file_name.contains("..") || file_name.contains('/') || file_name.contains('\\') {
            return Err(ScreeningError::InvalidFileName);
        }

        Ok(())
    }

    /// Validate file extension. Names without an extension pass.
    pub fn check_extension(&self, file_name: &str) -> Result<(), ScreeningError> {
        let extension = extract_extension(file_name);

        if !extension.is_empty() && !self.config.is_extension_allowed(&extension) {
            return Err(ScreeningError::UnsupportedExtension(extension));
        }

        Ok(())
    }

    /// Validate the declared content type. An empty hint passes.
    pub fn check_mime_type(&self, type_hint: &str) -> Result<(), ScreeningError> {
        let normalized = type_hint.to_lowercase();

        if !normalized.is_empty() && !self.config.is_mime_type_allowed(&normalized) {
            return Err(ScreeningError::UnsupportedMimeType(type_hint.to_string()));
        }

        Ok(())
    }

    /// Run every check and collect all failures, in check order.
    pub fn screen(&self, file_name: &str, size: u64, type_hint: &str) -> ScreeningOutcome {
        let warnings: Vec<String> = [
            self.check_file_size(size),
            self.check_file_name(file_name),
            self.check_extension(file_name),
            self.check_mime_type(type_hint),
        ]
        .into_iter()
        .filter_map(Result::err)
        .map(|e| e.to_string())
        .collect();

        if !warnings.is_empty() {
            tracing::warn!(
                file_name = %file_name,
                size_bytes = size,
                type_hint = %type_hint,
                warnings = ?warnings,
                "File failed security screening"
            );
        }

        ScreeningOutcome {
            is_secure: warnings.is_empty(),
            warnings,
        }
    }
}
