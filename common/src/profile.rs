//! モデルプロファイル
//!
//! モデルIDとレスポンス形式（ツール呼び出し / JSONテキスト）の組

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// AIに要求するレスポンス形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseStyle {
    /// 関数スキーマを宣言し、呼び出しを強制する
    #[default]
    ToolCall,
    /// 生のJSONオブジェクトのみをテキストで返させる
    JsonText,
}

impl ResponseStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStyle::ToolCall => "tool-call",
            ResponseStyle::JsonText => "json-text",
        }
    }
}

impl fmt::Display for ResponseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "tool-call" | "tool_call" | "tool" => Ok(ResponseStyle::ToolCall),
            "json-text" | "json_text" | "json" => Ok(ResponseStyle::JsonText),
            other => Err(Error::Config(format!("unknown response style: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub model: String,
    pub style: ResponseStyle,
}

impl ModelProfile {
    pub fn new(model: impl Into<String>, style: ResponseStyle) -> Self {
        Self {
            model: model.into(),
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_style() {
        assert_eq!("tool-call".parse::<ResponseStyle>().unwrap(), ResponseStyle::ToolCall);
        assert_eq!("JSON".parse::<ResponseStyle>().unwrap(), ResponseStyle::JsonText);
        assert_eq!("json_text".parse::<ResponseStyle>().unwrap(), ResponseStyle::JsonText);
    }

    #[test]
    fn test_parse_response_style_unknown() {
        let err = "xml".parse::<ResponseStyle>().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_response_style_serde() {
        let json = serde_json::to_string(&ResponseStyle::JsonText).unwrap();
        assert_eq!(json, "\"json-text\"");
        let style: ResponseStyle = serde_json::from_str("\"tool-call\"").unwrap();
        assert_eq!(style, ResponseStyle::ToolCall);
    }
}
