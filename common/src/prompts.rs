//! プロンプト生成モジュール
//!
//! - build_system_prompt: 疾患カテゴリと免責指示を含むシステムプロンプト
//! - build_user_instruction: レスポンス形式ごとのユーザー指示
//! - analysis_tool_parameters: ツール呼び出し用の関数パラメータスキーマ

use crate::profile::ResponseStyle;
use crate::taxonomy::render_taxonomy;
use serde_json::{json, Value};

/// 強制呼び出しする関数名
pub const ANALYSIS_TOOL_NAME: &str = "report_skin_analysis";

pub const ANALYSIS_TOOL_DESCRIPTION: &str =
    "Report the results of analyzing a skin image for potential conditions";

/// 出力JSONのフィールド（順序はスキーマの required と一致）
pub const RESULT_FIELDS: &[&str] = &[
    "disease",
    "confidence",
    "description",
    "symptoms",
    "remedies",
    "whenToSeeDoctor",
    "prevention",
];

const DISCLAIMER: &str =
    "This is for educational purposes only. Always recommend consulting a healthcare professional.";

/// システムプロンプト生成
pub fn build_system_prompt() -> String {
    format!(
        r#"You are a medical AI assistant specialized in dermatology and skin disease detection.

Identify potential skin conditions from these categories:
{taxonomy}

{DISCLAIMER}"#,
        taxonomy = render_taxonomy(),
    )
}

/// ユーザー指示生成
///
/// ツール呼び出し形式では関数呼び出しを、JSONテキスト形式では
/// 生のJSONオブジェクトのみを要求する
pub fn build_user_instruction(style: ResponseStyle) -> String {
    let base = "Analyze this skin image. Identify the most likely skin condition, symptoms, remedies, when to see a doctor, and prevention tips.";
    let unknown = "If the image is unclear or not skin-related, report disease as 'Unknown' with general skin care advice.";

    match style {
        ResponseStyle::ToolCall => format!(
            "{base} Call the {ANALYSIS_TOOL_NAME} function with your findings. {unknown}"
        ),
        ResponseStyle::JsonText => format!(
            r#"{base} {unknown}

Respond with ONLY a raw JSON object in exactly this shape:
{{
  "disease": "name of the condition",
  "confidence": 0-100,
  "description": "brief description",
  "symptoms": ["..."],
  "remedies": ["..."],
  "whenToSeeDoctor": "when to seek medical attention",
  "prevention": ["..."]
}}

Do not wrap the JSON in markdown code fences. Do not add any commentary before or after it."#
        ),
    }
}

/// 関数パラメータのJSONスキーマ
pub fn analysis_tool_parameters() -> Value {
    json!({
        "type": "object",
        "properties": {
            "disease": { "type": "string", "description": "Name of the identified skin condition" },
            "confidence": { "type": "number", "description": "Confidence percentage (0-100)" },
            "description": { "type": "string", "description": "Brief description of the condition" },
            "symptoms": { "type": "array", "items": { "type": "string" }, "description": "Common symptoms" },
            "remedies": { "type": "array", "items": { "type": "string" }, "description": "Recommended remedies and treatments" },
            "whenToSeeDoctor": { "type": "string", "description": "When to seek medical attention" },
            "prevention": { "type": "array", "items": { "type": "string" }, "description": "Prevention tips" }
        },
        "required": RESULT_FIELDS,
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_contains_taxonomy_and_disclaimer() {
        let prompt = build_system_prompt();
        assert!(prompt.contains("1. INFECTIOUS: Bacterial (Impetigo"));
        assert!(prompt.contains("Melanoma"));
        assert!(prompt.ends_with(DISCLAIMER));
    }

    #[test]
    fn test_tool_call_instruction() {
        let text = build_user_instruction(ResponseStyle::ToolCall);
        assert!(text.contains("Call the report_skin_analysis function"));
        assert!(!text.contains("ONLY a raw JSON"));
    }

    #[test]
    fn test_json_text_instruction() {
        let text = build_user_instruction(ResponseStyle::JsonText);
        assert!(text.contains("ONLY a raw JSON object"));
        assert!(text.contains("\"whenToSeeDoctor\""));
        assert!(text.contains("code fences"));
        assert!(!text.contains(ANALYSIS_TOOL_NAME));
    }

    #[test]
    fn test_tool_parameters_schema() {
        let schema = analysis_tool_parameters();
        assert_eq!(schema["additionalProperties"], false);
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, RESULT_FIELDS);
        for field in RESULT_FIELDS {
            assert!(schema["properties"].get(*field).is_some(), "missing {}", field);
        }
        assert_eq!(schema["properties"]["symptoms"]["items"]["type"], "string");
    }
}
