use crate::error::{Result, TriageError};
use serde::{Deserialize, Serialize};
use skin_triage_common::{ModelProfile, ResponseStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_KEY_ENV: &str = "AI_GATEWAY_API_KEY";
pub const MODEL_ENV: &str = "SKIN_TRIAGE_MODEL";
pub const ENDPOINT_ENV: &str = "SKIN_TRIAGE_ENDPOINT";

/// data URIで送られるスマートフォン写真を受け付けられる上限
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// 起動時に一度だけ読み込み、以降は不変
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub response_style: ResponseStyle,
    pub timeout_seconds: u64,
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://ai.gateway.lovable.dev/v1/chat/completions".into(),
            model: "google/gemini-2.5-flash".into(),
            response_style: ResponseStyle::ToolCall,
            timeout_seconds: 120,
            host: "127.0.0.1".into(),
            port: 8787,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// 設定ファイルを読み込み（無ければデフォルト）
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| TriageError::Config(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TriageError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("skin-triage").join("config.json"))
    }

    /// プロセス環境変数で上書き
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数で上書き（テストでは環境変数を触らずに使う）
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(model) = lookup(MODEL_ENV) {
            self.model = model;
        }
        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            self.endpoint = endpoint;
        }
        self
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(TriageError::MissingApiKey)
    }

    pub fn profile(&self) -> ModelProfile {
        ModelProfile::new(self.model.clone(), self.response_style)
    }

    pub fn apply_profile(&mut self, profile: ModelProfile) {
        self.model = profile.model;
        self.response_style = profile.style;
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
