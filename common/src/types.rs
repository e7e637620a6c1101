//! 解析結果の型定義
//!
//! サーバーとCLIで共有される型:
//! - AnalysisRequest: 受信リクエスト（画像URLまたはdata URI）
//! - AnalysisResult: 正規化済みの解析結果（常に全フィールドが埋まる）

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// フィールド毎のデフォルト値
pub mod defaults {
    pub const DISEASE: &str = "Unknown";
    pub const CONFIDENCE: u64 = 50;
    pub const DESCRIPTION: &str = "Please consult a healthcare professional.";
    pub const SYMPTOMS: &[&str] = &["Consult a dermatologist"];
    pub const REMEDIES: &[&str] = &["Consult a dermatologist"];
    pub const WHEN_TO_SEE_DOCTOR: &str = "If symptoms persist, consult a doctor.";
    pub const PREVENTION: &[&str] = &["Regular skin checks", "Sun protection"];
}

/// どの抽出戦略も成功しなかった場合の固定結果
pub mod inconclusive {
    pub const DISEASE: &str = "Analysis Inconclusive";
    pub const CONFIDENCE: u64 = 0;
    pub const DESCRIPTION: &str =
        "Could not analyze the image. Please upload a clearer, well-lit photo.";
    pub const SYMPTOMS: &[&str] = &["Upload a clearer image"];
    pub const REMEDIES: &[&str] = &["Consult a dermatologist"];
    pub const WHEN_TO_SEE_DOCTOR: &str =
        "If you have skin concerns, consult a healthcare professional.";
    pub const PREVENTION: &[&str] = &["Regular skin checks", "Sun protection", "Good hygiene"];
}

/// 解析リクエスト
///
/// `image` は http(s) URL か `data:<mime>;base64,<payload>` 形式。
/// 未指定・null は空として扱い、解析側で `MissingInput` になる。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub image: Option<String>,
}

/// AI解析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub disease: String,          // 疾患名
    pub confidence: Number,       // 確信度（モデルの値をそのまま保持、クランプなし）
    pub description: String,      // 説明
    pub symptoms: Vec<String>,    // 症状
    pub remedies: Vec<String>,    // 対処法
    pub when_to_see_doctor: String,
    pub prevention: Vec<String>,  // 予防
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            disease: defaults::DISEASE.to_string(),
            confidence: Number::from(defaults::CONFIDENCE),
            description: defaults::DESCRIPTION.to_string(),
            symptoms: to_owned_list(defaults::SYMPTOMS),
            remedies: to_owned_list(defaults::REMEDIES),
            when_to_see_doctor: defaults::WHEN_TO_SEE_DOCTOR.to_string(),
            prevention: to_owned_list(defaults::PREVENTION),
        }
    }
}

impl AnalysisResult {
    /// 判定不能時のフォールバック結果
    ///
    /// エラーではなく正常な結果として呼び出し側に返す
    pub fn inconclusive() -> Self {
        Self {
            disease: inconclusive::DISEASE.to_string(),
            confidence: Number::from(inconclusive::CONFIDENCE),
            description: inconclusive::DESCRIPTION.to_string(),
            symptoms: to_owned_list(inconclusive::SYMPTOMS),
            remedies: to_owned_list(inconclusive::REMEDIES),
            when_to_see_doctor: inconclusive::WHEN_TO_SEE_DOCTOR.to_string(),
            prevention: to_owned_list(inconclusive::PREVENTION),
        }
    }

    pub fn is_inconclusive(&self) -> bool {
        self.disease == inconclusive::DISEASE
    }
}

pub(crate) fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
