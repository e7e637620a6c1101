//! フィールド単位の正規化
//!
//! 抽出したJSONオブジェクトの各フィールドを個別に検証し、
//! 欠落・型違い・空のフィールドだけをデフォルト値で置き換える。
//! 正しいフィールドはそのまま残す。

use crate::parser::JsonObject;
use crate::types::{defaults, to_owned_list, AnalysisResult};
use serde_json::{Number, Value};

/// JSONオブジェクトを AnalysisResult に正規化
pub fn normalize_fields(obj: &JsonObject) -> AnalysisResult {
    AnalysisResult {
        disease: get_text(obj, "disease").unwrap_or_else(|| defaults::DISEASE.to_string()),
        confidence: get_number(obj, "confidence")
            .unwrap_or_else(|| Number::from(defaults::CONFIDENCE)),
        description: get_text(obj, "description")
            .unwrap_or_else(|| defaults::DESCRIPTION.to_string()),
        symptoms: get_text_list(obj, "symptoms")
            .unwrap_or_else(|| to_owned_list(defaults::SYMPTOMS)),
        remedies: get_text_list(obj, "remedies")
            .unwrap_or_else(|| to_owned_list(defaults::REMEDIES)),
        when_to_see_doctor: get_text(obj, "whenToSeeDoctor")
            .unwrap_or_else(|| defaults::WHEN_TO_SEE_DOCTOR.to_string()),
        prevention: get_text_list(obj, "prevention")
            .unwrap_or_else(|| to_owned_list(defaults::PREVENTION)),
    }
}

/// 空白のみでない文字列
fn get_text(obj: &JsonObject, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// JSON数値のみ（文字列の数値は型違いとして扱う）。整数・小数の表記はそのまま
fn get_number(obj: &JsonObject, key: &str) -> Option<Number> {
    match obj.get(key)? {
        Value::Number(n) => Some(n.clone()),
        _ => None,
    }
}

/// 文字列配列。文字列以外・空白のみの要素は除き、残りが空ならデフォルト扱い
fn get_text_list(obj: &JsonObject, key: &str) -> Option<Vec<String>> {
    let items: Vec<String> = obj
        .get(key)?
        .as_array()?
        .iter()
        .filter_map(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn complete() -> Value {
        json!({
            "disease": "Contact Dermatitis",
            "confidence": 78.5,
            "description": "Skin inflammation caused by contact with an irritant.",
            "symptoms": ["Redness", "Itching"],
            "remedies": ["Avoid the irritant", "Hydrocortisone cream"],
            "whenToSeeDoctor": "If the rash spreads or blisters.",
            "prevention": ["Wear gloves"]
        })
    }

    #[test]
    fn test_complete_object_kept_verbatim() {
        let result = normalize_fields(&object(complete()));
        assert_eq!(result.disease, "Contact Dermatitis");
        assert_eq!(result.confidence.as_f64(), Some(78.5));
        assert_eq!(result.symptoms, vec!["Redness", "Itching"]);
        assert_eq!(result.remedies, vec!["Avoid the irritant", "Hydrocortisone cream"]);
        assert_eq!(result.when_to_see_doctor, "If the rash spreads or blisters.");
        assert_eq!(result.prevention, vec!["Wear gloves"]);
    }

    #[test]
    fn test_empty_object_all_defaults() {
        let result = normalize_fields(&JsonObject::new());
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn test_missing_prevention_only() {
        let mut value = complete();
        value.as_object_mut().unwrap().remove("prevention");
        let result = normalize_fields(&object(value));

        assert_eq!(result.disease, "Contact Dermatitis");
        assert_eq!(result.confidence.as_f64(), Some(78.5));
        assert_eq!(result.prevention, vec!["Regular skin checks", "Sun protection"]);
    }

    #[test]
    fn test_wrong_shapes_defaulted_individually() {
        let result = normalize_fields(&object(json!({
            "disease": 42,
            "confidence": "85",
            "description": "",
            "symptoms": "Redness",
            "remedies": [1, 2],
            "whenToSeeDoctor": ["soon"],
            "prevention": []
        })));
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn test_confidence_zero_is_kept() {
        let result = normalize_fields(&object(json!({"confidence": 0})));
        assert_eq!(result.confidence, Number::from(0));
    }

    #[test]
    fn test_confidence_not_clamped() {
        let result = normalize_fields(&object(json!({"confidence": 140})));
        assert_eq!(result.confidence, Number::from(140));
    }

    #[test]
    fn test_integer_confidence_stays_integer() {
        let result = normalize_fields(&object(json!({"confidence": 87})));
        let text = serde_json::to_string(&result).unwrap();
        assert!(text.contains(r#""confidence":87,"#), "{}", text);
        assert!(!text.contains("87.0"));
    }

    #[test]
    fn test_mixed_list_keeps_strings() {
        let result = normalize_fields(&object(json!({
            "symptoms": ["Scaling", null, 3, "  ", "Itching"]
        })));
        assert_eq!(result.symptoms, vec!["Scaling", "Itching"]);
    }

    #[test]
    fn test_null_fields_defaulted() {
        let result = normalize_fields(&object(json!({
            "disease": null,
            "confidence": null,
            "symptoms": null
        })));
        assert_eq!(result, AnalysisResult::default());
    }
}
