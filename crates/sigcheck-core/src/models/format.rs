use serde::{Deserialize, Serialize};
use std::fmt;

/// Format detected from a file's leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
    Tiff,
    Ico,
    Svg,
    /// No known signature matched
    Unknown,
    /// The matcher itself failed on this file
    Error,
}

impl FormatTag {
    pub const ALL: [FormatTag; 10] = [
        FormatTag::Jpeg,
        FormatTag::Png,
        FormatTag::Gif,
        FormatTag::Webp,
        FormatTag::Bmp,
        FormatTag::Tiff,
        FormatTag::Ico,
        FormatTag::Svg,
        FormatTag::Unknown,
        FormatTag::Error,
    ];

    /// Canonical lowercase tag, the value extensions are compared against
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Jpeg => "jpeg",
            FormatTag::Png => "png",
            FormatTag::Gif => "gif",
            FormatTag::Webp => "webp",
            FormatTag::Bmp => "bmp",
            FormatTag::Tiff => "tiff",
            FormatTag::Ico => "ico",
            FormatTag::Svg => "svg",
            FormatTag::Unknown => "unknown",
            FormatTag::Error => "error",
        }
    }

    /// Human-readable name for tables and summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            FormatTag::Jpeg => "JPEG",
            FormatTag::Png => "PNG",
            FormatTag::Gif => "GIF",
            FormatTag::Webp => "WebP",
            FormatTag::Bmp => "BMP",
            FormatTag::Tiff => "TIFF",
            FormatTag::Ico => "ICO",
            FormatTag::Svg => "SVG",
            FormatTag::Unknown => "Unknown",
            FormatTag::Error => "Error",
        }
    }

    /// True for tags that name an actual image format
    pub fn is_known(&self) -> bool {
        !matches!(self, FormatTag::Unknown | FormatTag::Error)
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&FormatTag::Webp).unwrap();
        assert_eq!(json, "\"webp\"");

        let tag: FormatTag = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(tag, FormatTag::Error);
    }

    #[test]
    fn test_as_str_matches_serde_name() {
        for tag in FormatTag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json.trim_matches('"'), tag.as_str());
            assert_eq!(tag.to_string(), tag.as_str());
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(FormatTag::Webp.display_name(), "WebP");
        assert_eq!(FormatTag::Unknown.display_name(), "Unknown");
        assert!(FormatTag::Svg.is_known());
        assert!(!FormatTag::Error.is_known());
    }
}
