//! CLI用の画像入力
//!
//! URL・data URIはそのまま、ローカルファイルはBase64のdata URIに変換する

use crate::error::{Result, TriageError};
use base64::Engine;
use skin_triage_common::image::{build_data_url, mime_type_for_extension, parse_data_url};
use skin_triage_common::ImageSource;
use std::path::Path;

/// CLI引数の画像指定をリクエスト用の文字列に変換
pub fn resolve_image_reference(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TriageError::MissingInput);
    }

    match ImageSource::classify(input) {
        ImageSource::Url(url) => Ok(url.to_string()),
        ImageSource::DataUri { .. } => {
            parse_data_url(input)?;
            Ok(input.to_string())
        }
        ImageSource::Other(path) => encode_image_file(Path::new(path)),
    }
}

/// 画像ファイルをdata URIに変換
pub fn encode_image_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(TriageError::FileNotFound(path.display().to_string()));
    }

    let mime_type = path
        .extension()
        .and_then(|ext| mime_type_for_extension(&ext.to_string_lossy()))
        .ok_or_else(|| TriageError::UnsupportedImage(path.display().to_string()))?;

    let bytes = std::fs::read(path)?;
    if bytes.is_empty() {
        return Err(TriageError::UnsupportedImage(format!("{} (empty file)", path.display())));
    }

    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(build_data_url(mime_type, &encoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_url_passthrough() {
        let url = resolve_image_reference("https://example.com/rash.png").unwrap();
        assert_eq!(url, "https://example.com/rash.png");
    }

    #[test]
    fn test_data_uri_passthrough() {
        let uri = resolve_image_reference("data:image/png;base64,AAAA").unwrap();
        assert_eq!(uri, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_data_uri_invalid() {
        let err = resolve_image_reference("data:image/png,AAAA").unwrap_err();
        assert!(matches!(err, TriageError::Common(_)));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(resolve_image_reference("  "), Err(TriageError::MissingInput)));
    }

    #[test]
    fn test_local_file_encoded() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("rash.JPG");
        std::fs::write(&path, [0xFFu8, 0xD8, 0xFF]).unwrap();

        let uri = resolve_image_reference(path.to_str().unwrap()).unwrap();
        assert_eq!(uri, "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_missing_file() {
        let err = resolve_image_reference("/nonexistent/rash.jpg").unwrap_err();
        assert!(matches!(err, TriageError::FileNotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let err = encode_image_file(&path).unwrap_err();
        assert!(matches!(err, TriageError::UnsupportedImage(_)));
    }
}
