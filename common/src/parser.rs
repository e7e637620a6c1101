//! APIレスポンスパーサー
//!
//! AIゲートウェイのレスポンスから解析結果のJSONオブジェクトを取り出す。
//!
//! 抽出優先順位:
//! 1. ツール呼び出しの arguments
//! 2. メッセージ本文をそのままJSONとして
//! 3. ```json ... ``` フェンスを除去して
//! 4. 最初の `{` から最後の `}` までを切り出し、軽い修復をして
//! 5. すべて失敗 → Unparseable（呼び出し側でフォールバック結果を返す）

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

pub type JsonObject = Map<String, Value>;

lazy_static! {
    static ref FENCE_OPEN_RE: Regex = Regex::new(r"(?i)```json\s*").unwrap();
    static ref FENCE_RE: Regex = Regex::new(r"```\s*").unwrap();
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",\s*([}\]])").unwrap();
    static ref CONTROL_CHAR_RE: Regex = Regex::new(r"[\x00-\x1F\x7F]").unwrap();
}

/// 抽出結果（どの戦略で成功したか）
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    ToolCall(JsonObject),
    RawJson(JsonObject),
    FencedJson(JsonObject),
    BraceScan(JsonObject),
    Unparseable,
}

impl Extraction {
    pub fn strategy(&self) -> &'static str {
        match self {
            Extraction::ToolCall(_) => "tool-call",
            Extraction::RawJson(_) => "raw-json",
            Extraction::FencedJson(_) => "fenced-json",
            Extraction::BraceScan(_) => "brace-scan",
            Extraction::Unparseable => "unparseable",
        }
    }

    pub fn into_object(self) -> Option<JsonObject> {
        match self {
            Extraction::ToolCall(obj)
            | Extraction::RawJson(obj)
            | Extraction::FencedJson(obj)
            | Extraction::BraceScan(obj) => Some(obj),
            Extraction::Unparseable => None,
        }
    }
}

/// レスポンスから解析結果オブジェクトを抽出
///
/// # Arguments
/// * `tool_arguments` - ツール呼び出しの arguments（文字列またはオブジェクト）
/// * `content` - メッセージ本文
pub fn extract_analysis(tool_arguments: Option<&Value>, content: Option<&str>) -> Extraction {
    if let Some(obj) = tool_arguments.and_then(parse_tool_arguments) {
        return Extraction::ToolCall(obj);
    }

    let Some(content) = content else {
        return Extraction::Unparseable;
    };

    if let Some(obj) = parse_raw_json(content) {
        return Extraction::RawJson(obj);
    }
    if let Some(obj) = parse_fenced_json(content) {
        return Extraction::FencedJson(obj);
    }
    if let Some(obj) = parse_brace_scan(content) {
        return Extraction::BraceScan(obj);
    }

    Extraction::Unparseable
}

/// ツール呼び出しの arguments をパース
///
/// 通常はJSON文字列だが、オブジェクトのまま返すゲートウェイもある
pub fn parse_tool_arguments(arguments: &Value) -> Option<JsonObject> {
    match arguments {
        Value::String(s) => parse_object(s),
        Value::Object(obj) => Some(obj.clone()),
        _ => None,
    }
}

/// 本文をそのままJSONオブジェクトとしてパース
pub fn parse_raw_json(content: &str) -> Option<JsonObject> {
    parse_object(content.trim())
}

/// コードフェンスを除去してからパース
///
/// フェンスが含まれない場合は None（RawJson と区別するため）
pub fn parse_fenced_json(content: &str) -> Option<JsonObject> {
    if !content.contains("```") {
        return None;
    }
    parse_object(&strip_code_fences(content))
}

/// 最初の `{` から最後の `}` までを切り出し、修復してからパース
pub fn parse_brace_scan(content: &str) -> Option<JsonObject> {
    let slice = scan_braces(content)?;
    parse_object(&repair_json(slice))
}

/// ```json / ``` マーカーを除去
pub fn strip_code_fences(content: &str) -> String {
    let without_open = FENCE_OPEN_RE.replace_all(content, "");
    FENCE_RE.replace_all(&without_open, "").trim().to_string()
}

/// 最初の `{` と最後の `}` で囲まれた範囲
pub fn scan_braces(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end > start {
        Some(&content[start..=end])
    } else {
        None
    }
}

/// 軽い修復: 閉じ括弧直前の末尾カンマを削除し、制御文字を空白に置換
pub fn repair_json(json: &str) -> String {
    let without_commas = TRAILING_COMMA_RE.replace_all(json, "$1");
    CONTROL_CHAR_RE.replace_all(&without_commas, " ").into_owned()
}

fn parse_object(text: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}
