//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse() {
        let error = Error::Parse("data URIにカンマがありません".to_string());
        assert_eq!(format!("{}", error), "Parse error: data URIにカンマがありません");
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("unknown response style: xml".to_string());
        assert_eq!(format!("{}", error), "Config error: unknown response style: xml");
    }
}
