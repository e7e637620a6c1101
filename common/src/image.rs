//! 画像参照の判別
//!
//! リクエストの `image` 文字列を URL / data URI に分類する。
//! 中身の検証は行わない（空でないことのみ解析側で確認）

use crate::error::{Error, Result};

/// 画像参照の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// http(s) URL
    Url(&'a str),
    /// `data:<mime>;base64,<payload>`
    DataUri { mime_type: &'a str, data: &'a str },
    /// 判別できない文字列（そのままゲートウェイへ渡す）
    Other(&'a str),
}

impl<'a> ImageSource<'a> {
    pub fn classify(image: &'a str) -> Self {
        let trimmed = image.trim();
        let lower = trimmed.get(..8).unwrap_or(trimmed).to_ascii_lowercase();

        if lower.starts_with("http://") || lower.starts_with("https://") {
            return ImageSource::Url(trimmed);
        }

        if lower.starts_with("data:") {
            if let Some(data) = extract_base64_from_data_url(trimmed) {
                let mime_type = extract_mime_type_from_data_url(trimmed);
                return ImageSource::DataUri { mime_type, data };
            }
        }

        ImageSource::Other(trimmed)
    }

    /// ログ出力用の種別名（ペイロードは出さない）
    pub fn kind(&self) -> &'static str {
        match self {
            ImageSource::Url(_) => "url",
            ImageSource::DataUri { .. } => "data-uri",
            ImageSource::Other(_) => "other",
        }
    }

    /// ペイロードのおおよそのサイズ（バイト）
    pub fn approx_len(&self) -> usize {
        match self {
            ImageSource::Url(s) | ImageSource::Other(s) => s.len(),
            ImageSource::DataUri { data, .. } => data.len() / 4 * 3,
        }
    }
}

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split_once(',').map(|(_, data)| data)
}

/// Data URLからMIMEタイプを抽出
///
/// 抽出失敗時は "image/jpeg" を返す
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .split_once(':')
        .and_then(|(_, rest)| rest.split(|c| c == ';' || c == ',').next())
        .filter(|s| !s.is_empty())
        .unwrap_or("image/jpeg")
}

/// Base64文字列からData URLを組み立てる
pub fn build_data_url(mime_type: &str, base64_data: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_data)
}

/// Data URLを厳密にパース（CLI入力の検証用）
pub fn parse_data_url(data_url: &str) -> Result<(&str, &str)> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| Error::Parse("data: で始まっていません".into()))?;
    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| Error::Parse("data URIにカンマがありません".into()))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| Error::Parse("base64エンコードではありません".into()))?;
    if data.is_empty() {
        return Err(Error::Parse("data URIのペイロードが空です".into()));
    }
    Ok((mime_type, data))
}

/// 拡張子からMIMEタイプを判定
pub fn mime_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
