//! Magic-byte signature matching
//!
//! Ordered exact-byte checks over the first [`PREFIX_LEN`] bytes of a file,
//! first match wins, followed by a best-effort text sniff for SVG.

use std::io;

use sigcheck_core::FormatTag;

use crate::handle::FileHandle;

/// Number of leading bytes inspected per file
pub const PREFIX_LEN: usize = 16;

/// Known signature: every `(offset, bytes)` window must match
struct Signature {
    tag: FormatTag,
    windows: &'static [(usize, &'static [u8])],
}

const SIGNATURES: &[Signature] = &[
    Signature {
        tag: FormatTag::Jpeg,
        windows: &[(0, &[0xFF, 0xD8, 0xFF])],
    },
    Signature {
        tag: FormatTag::Png,
        windows: &[(0, &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])],
    },
    Signature {
        tag: FormatTag::Gif,
        windows: &[(0, b"GIF87a")],
    },
    Signature {
        tag: FormatTag::Gif,
        windows: &[(0, b"GIF89a")],
    },
    // RIFF container with a WEBP form type
    Signature {
        tag: FormatTag::Webp,
        windows: &[(0, b"RIFF"), (8, b"WEBP")],
    },
    Signature {
        tag: FormatTag::Bmp,
        windows: &[(0, b"BM")],
    },
    Signature {
        tag: FormatTag::Tiff,
        windows: &[(0, &[0x49, 0x49, 0x2A, 0x00])], // little endian
    },
    Signature {
        tag: FormatTag::Tiff,
        windows: &[(0, &[0x4D, 0x4D, 0x00, 0x2A])], // big endian
    },
    Signature {
        tag: FormatTag::Ico,
        windows: &[(0, &[0x00, 0x00, 0x01, 0x00])],
    },
];

const SVG_MARKERS: [&str; 2] = ["<?xml", "<svg"];

impl Signature {
    fn matches(&self, prefix: &[u8]) -> bool {
        self.windows
            .iter()
            .all(|(offset, bytes)| prefix.get(*offset..offset + bytes.len()) == Some(*bytes))
    }
}

/// Detect the format encoded in `prefix`.
///
/// Only the first [`PREFIX_LEN`] bytes are considered. Offsets past the end of
/// a short prefix never match.
pub fn detect_type(prefix: &[u8]) -> FormatTag {
    let prefix = &prefix[..prefix.len().min(PREFIX_LEN)];

    if let Some(signature) = SIGNATURES.iter().find(|s| s.matches(prefix)) {
        return signature.tag;
    }

    // Invalid UTF-8 becomes replacement characters, which simply never match.
    let text = String::from_utf8_lossy(prefix);
    if SVG_MARKERS.iter().any(|marker| text.contains(marker)) {
        return FormatTag::Svg;
    }

    FormatTag::Unknown
}

/// Errors that mean the bytes themselves could not be decoded, as opposed to
/// the handle being unusable.
fn is_decode_fault(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof
    )
}

/// Read a file's prefix and match it.
///
/// Decode faults are downgraded to [`FormatTag::Error`] for this file; any other
/// read failure is returned to the caller.
pub(crate) async fn probe<H: FileHandle + ?Sized>(file: &H) -> io::Result<FormatTag> {
    match file.read_prefix(PREFIX_LEN).await {
        Ok(prefix) => Ok(detect_type(&prefix)),
        Err(e) if is_decode_fault(&e) => {
            tracing::warn!(
                file_name = %file.name(),
                error = %e,
                "Failed to decode file prefix"
            );
            Ok(FormatTag::Error)
        }
        Err(e) => Err(e),
    }
}

/// Detect a file's format. Never fails: every read error becomes
/// [`FormatTag::Error`].
pub async fn detect_file_type<H: FileHandle + ?Sized>(file: &H) -> FormatTag {
    match probe(file).await {
        Ok(tag) => tag,
        Err(e) => {
            tracing::error!(
                file_name = %file.name(),
                error = %e,
                "Failed to read file while detecting its type"
            );
            FormatTag::Error
        }
    }
}
