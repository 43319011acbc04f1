use std::path::Path;
use std::sync::Arc;

use sigcheck_core::{AnalysisError, BatchSummary, FormatTag, SecurityConfig};
use sigcheck_processing::{BatchAnalyzer, LocalFile};
use tempfile::tempdir;

const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
    0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 dimensions
];
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
const SVG: &[u8] = b"<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>";

async fn write_file(dir: &Path, name: &str, data: &[u8]) -> LocalFile {
    let path = dir.join(name);
    tokio::fs::write(&path, data).await.unwrap();
    LocalFile::open(&path).await.unwrap()
}

#[tokio::test]
async fn test_analyze_local_files() {
    let dir = tempdir().unwrap();
    let files = vec![
        write_file(dir.path(), "good.png", PNG).await,
        write_file(dir.path(), "renamed.png", JPEG).await,
        write_file(dir.path(), "photo.JPG", JPEG).await,
        write_file(dir.path(), "drawing.svg", SVG).await,
        write_file(dir.path(), "notes.txt", b"plain text").await,
        write_file(dir.path(), "empty.gif", b"").await,
    ];

    let analyzer = BatchAnalyzer::new(Arc::new(SecurityConfig::default()));
    let results = analyzer.analyze_files(&files).await.unwrap();

    let detected: Vec<(&str, FormatTag, bool)> = results
        .iter()
        .map(|r| (r.file_name.as_str(), r.detected_type, r.is_match))
        .collect();
    assert_eq!(
        detected,
        vec![
            ("good.png", FormatTag::Png, true),
            ("renamed.png", FormatTag::Jpeg, false),
            ("photo.JPG", FormatTag::Jpeg, true),
            ("drawing.svg", FormatTag::Svg, true),
            ("notes.txt", FormatTag::Unknown, false),
            ("empty.gif", FormatTag::Unknown, false),
        ]
    );

    let notes = &results[4];
    assert!(!notes.is_secure);
    assert_eq!(
        notes.security_warnings,
        vec![
            "Unsupported extension: .txt".to_string(),
            "Unsupported MIME type: text/plain".to_string(),
        ]
    );

    assert_eq!(results[2].file_extension, "jpg");
    assert_eq!(results[0].file_size, PNG.len() as u64);

    let summary = BatchSummary::from_results(&results);
    assert_eq!(summary.total, 6);
    assert_eq!(summary.matched, 3);
    assert_eq!(summary.mismatched, 3);
    assert_eq!(summary.insecure, 1);
}

#[tokio::test]
async fn test_removed_file_fails_batch() {
    let dir = tempdir().unwrap();
    let files = vec![
        write_file(dir.path(), "a.png", PNG).await,
        write_file(dir.path(), "b.png", PNG).await,
    ];
    tokio::fs::remove_file(files[1].path()).await.unwrap();

    let analyzer = BatchAnalyzer::new(Arc::new(SecurityConfig::default()));
    let err = analyzer.analyze_files(&files).await.unwrap_err();

    assert!(matches!(err, AnalysisError::FileRead { ref file_name, .. } if file_name == "b.png"));
}

#[tokio::test]
async fn test_results_serialize_for_collaborators() {
    let dir = tempdir().unwrap();
    let files = vec![write_file(dir.path(), "image.png", JPEG).await];

    let analyzer = BatchAnalyzer::new(Arc::new(SecurityConfig::default()));
    let results = analyzer.analyze_files(&files).await.unwrap();

    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json[0]["fileName"], "image.png");
    assert_eq!(json[0]["fileExtension"], "png");
    assert_eq!(json[0]["detectedType"], "jpeg");
    assert_eq!(json[0]["isMatch"], false);
}
