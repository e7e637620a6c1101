//! 皮膚画像解析
//!
//! 1枚の画像に対して上流APIを1回だけ呼び出し、
//! どのような形のレスポンスでも全フィールドが埋まった結果を返す。
//! エラーになるのは入力不足・設定不足・通信/上流エラーのみ。

pub mod gateway;

pub use gateway::{CompletionClient, GatewayReply, HttpGateway};

use crate::config::Config;
use crate::error::{Result, TriageError};
use gateway::{build_chat_request, ChatResponse};
use skin_triage_common::{extract_analysis, normalize_fields, AnalysisResult, ImageSource};
use tracing::{debug, error, info, warn};

pub struct Analyzer<C = HttpGateway> {
    config: Config,
    client: C,
}

impl Analyzer<HttpGateway> {
    /// 設定からHTTPゲートウェイ付きで生成
    pub fn from_config(config: Config) -> Result<Self> {
        let client = HttpGateway::new(config.endpoint.clone(), config.timeout())?;
        Ok(Self::new(config, client))
    }
}

impl<C: CompletionClient> Analyzer<C> {
    pub fn new(config: Config, client: C) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 画像を解析
    pub async fn analyze(&self, image: &str) -> Result<AnalysisResult> {
        let image = image.trim();
        if image.is_empty() {
            return Err(TriageError::MissingInput);
        }

        let api_key = self.config.api_key()?;
        let profile = self.config.profile();
        let source = ImageSource::classify(image);

        info!(
            model = %profile.model,
            style = %profile.style,
            source = source.kind(),
            approx_bytes = source.approx_len(),
            "Sending request to AI gateway"
        );

        let request = build_chat_request(&profile, image);
        let reply = self.client.complete(api_key, &request).await?;
        check_status(&reply)?;

        let response: ChatResponse = serde_json::from_str(&reply.body).map_err(|e| {
            warn!(error = %e, "AI gateway response is not a chat completion");
            TriageError::EmptyUpstreamResponse
        })?;

        let tool_arguments = response.tool_arguments();
        let content = response.message_text();
        if tool_arguments.is_none() && content.is_none() {
            return Err(TriageError::EmptyUpstreamResponse);
        }

        let extraction = extract_analysis(tool_arguments, content.as_deref());
        debug!(strategy = extraction.strategy(), "Response extracted");

        match extraction.into_object() {
            Some(obj) => {
                let result = normalize_fields(&obj);
                info!(disease = %result.disease, confidence = %result.confidence, "Analysis complete");
                Ok(result)
            }
            None => {
                let preview: String = content.unwrap_or_default().chars().take(300).collect();
                warn!(preview = %preview, "Could not extract result from AI response");
                Ok(AnalysisResult::inconclusive())
            }
        }
    }
}

/// 上流ステータスをエラーに変換
///
/// 429 → RateLimited、402 → QuotaExceeded、その他の非2xx → Upstream
pub fn check_status(reply: &GatewayReply) -> Result<()> {
    if reply.is_success() {
        return Ok(());
    }

    error!(status = reply.status, body = %reply.body, "AI gateway error");
    match reply.status {
        429 => Err(TriageError::RateLimited),
        402 => Err(TriageError::QuotaExceeded),
        status => Err(TriageError::Upstream {
            status,
            body: reply.body.clone(),
        }),
    }
}
