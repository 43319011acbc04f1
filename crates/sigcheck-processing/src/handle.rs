//! File handle abstraction
//!
//! The analyzer never owns file contents. It works against [`FileHandle`],
//! which exposes a name, a size, a declared content type and an async read of
//! a leading byte range.

use async_trait::async_trait;
use bytes::Bytes;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Opaque reference to a file supplied by the caller
#[async_trait]
pub trait FileHandle: Send + Sync {
    /// Name as given by the caller
    fn name(&self) -> &str;

    /// Byte length
    fn size(&self) -> u64;

    /// Declared content type, empty when unknown
    fn type_hint(&self) -> &str;

    /// Read bytes `[0, len)`. Shorter files yield fewer bytes.
    async fn read_prefix(&self, len: usize) -> io::Result<Bytes>;
}

#[async_trait]
impl<T: FileHandle + ?Sized> FileHandle for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn type_hint(&self) -> &str {
        (**self).type_hint()
    }

    async fn read_prefix(&self, len: usize) -> io::Result<Bytes> {
        (**self).read_prefix(len).await
    }
}

/// Content type a browser would typically declare for an extension
pub fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    let content_type = match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "exe" => "application/x-msdownload",
        _ => return None,
    };
    Some(content_type)
}

/// File on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    size: u64,
    type_hint: String,
}

impl LocalFile {
    /// Stat `path` and build a handle. The content type hint is derived from the
    /// extension, the way a browser file picker would.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = fs::metadata(&path).await?;

        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let extension = crate::extension::extract_extension(&name);
        let type_hint = content_type_for_extension(&extension)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            path,
            name,
            size: metadata.len(),
            type_hint,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FileHandle for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn type_hint(&self) -> &str {
        &self.type_hint
    }

    async fn read_prefix(&self, len: usize) -> io::Result<Bytes> {
        let file = fs::File::open(&self.path).await?;
        let mut buf = Vec::with_capacity(len);
        file.take(len as u64).read_to_end(&mut buf).await?;

        tracing::trace!(
            path = %self.path.display(),
            requested = len,
            read = buf.len(),
            "Read file prefix"
        );

        Ok(Bytes::from(buf))
    }
}

/// File whose contents are already in memory
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    type_hint: String,
    data: Bytes,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, type_hint: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            type_hint: type_hint.into(),
            data: data.into(),
        }
    }
}

#[async_trait]
impl FileHandle for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn type_hint(&self) -> &str {
        &self.type_hint
    }

    async fn read_prefix(&self, len: usize) -> io::Result<Bytes> {
        Ok(self.data.slice(..len.min(self.data.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_memory_file_prefix() {
        let file = MemoryFile::new("a.bin", "", vec![1u8, 2, 3, 4]);
        assert_eq!(file.size(), 4);
        assert_eq!(&file.read_prefix(2).await.unwrap()[..], &[1, 2]);
        assert_eq!(&file.read_prefix(16).await.unwrap()[..], &[1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_local_file_open_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Photo.PNG");
        tokio::fs::write(&path, b"0123456789abcdefXYZ").await.unwrap();

        let file = LocalFile::open(&path).await.unwrap();
        assert_eq!(file.name(), "Photo.PNG");
        assert_eq!(file.size(), 19);
        assert_eq!(file.type_hint(), "image/png");
        assert_eq!(file.path(), path.as_path());

        let prefix = file.read_prefix(16).await.unwrap();
        assert_eq!(&prefix[..], b"0123456789abcdef");
    }

    #[tokio::test]
    async fn test_local_file_short_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny");
        tokio::fs::write(&path, b"BM").await.unwrap();

        let file = LocalFile::open(&path).await.unwrap();
        assert_eq!(file.type_hint(), "");
        assert_eq!(&file.read_prefix(16).await.unwrap()[..], b"BM");
    }

    #[tokio::test]
    async fn test_local_file_rejects_directory() {
        let dir = tempdir().unwrap();
        let err = LocalFile::open(dir.path()).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_local_file_read_after_removal_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.jpg");
        tokio::fs::write(&path, [0xFF, 0xD8, 0xFF]).await.unwrap();

        let file = LocalFile::open(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        let err = file.read_prefix(16).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_content_type_for_extension() {
        assert_eq!(content_type_for_extension("jpg"), Some("image/jpeg"));
        assert_eq!(content_type_for_extension("tif"), Some("image/tiff"));
        assert_eq!(content_type_for_extension("xyz"), None);
    }
}
