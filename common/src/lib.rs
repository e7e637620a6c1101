//! Skin Triage Common Library
//!
//! サーバーとCLIで共有される型・プロンプト・レスポンス解析

pub mod types;
pub mod error;
pub mod taxonomy;
pub mod profile;
pub mod prompts;
pub mod image;
pub mod parser;
pub mod normalizer;

pub use types::{AnalysisRequest, AnalysisResult};
pub use error::{Error, Result};
pub use taxonomy::{ConditionCategory, ConditionGroup, CONDITION_CATEGORIES};
pub use profile::{ModelProfile, ResponseStyle};
pub use prompts::{
    analysis_tool_parameters, build_system_prompt, build_user_instruction, ANALYSIS_TOOL_NAME,
};
pub use image::ImageSource;
pub use parser::{extract_analysis, Extraction, JsonObject};
pub use normalizer::normalize_fields;
