use clap::ValueEnum;
use skin_triage_common::{ModelProfile, ResponseStyle};

/// 組み込みのモデルプロファイル
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProfilePreset {
    /// gemini-2.5-flash + ツール呼び出し
    Flash,
    /// gemini-2.5-pro + ツール呼び出し
    Pro,
    /// gemini-2.5-flash-lite + JSONテキスト
    Lite,
}

impl ProfilePreset {
    pub fn model_name(&self) -> &'static str {
        match self {
            ProfilePreset::Flash => "google/gemini-2.5-flash",
            ProfilePreset::Pro => "google/gemini-2.5-pro",
            ProfilePreset::Lite => "google/gemini-2.5-flash-lite",
        }
    }

    pub fn response_style(&self) -> ResponseStyle {
        match self {
            ProfilePreset::Flash | ProfilePreset::Pro => ResponseStyle::ToolCall,
            ProfilePreset::Lite => ResponseStyle::JsonText,
        }
    }

    pub fn model_profile(&self) -> ModelProfile {
        ModelProfile::new(self.model_name(), self.response_style())
    }
}
