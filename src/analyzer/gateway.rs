//! AIゲートウェイ連携（OpenAI互換 chat/completions）
//!
//! - リクエスト/レスポンスの型
//! - CompletionClient: 上流呼び出しの差し替え口（テストではスタブ）
//! - HttpGateway: reqwest による実装

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use skin_triage_common::{
    analysis_tool_parameters, build_system_prompt, build_user_instruction, ModelProfile,
    ResponseStyle, ANALYSIS_TOOL_NAME,
};
use skin_triage_common::prompts::ANALYSIS_TOOL_DESCRIPTION;
use std::time::Duration;

/// chat/completions リクエスト
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolChoice {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: ToolChoiceFunction,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolChoiceFunction {
    pub name: &'static str,
}

/// chat/completions レスポンス（必要な部分のみ）
#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub function: Option<FunctionCall>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl ChatResponse {
    fn first_message(&self) -> Option<&ResponseMessage> {
        self.choices.first()?.message.as_ref()
    }

    /// 最初のツール呼び出しの arguments（null・空文字は無しとみなす）
    pub fn tool_arguments(&self) -> Option<&Value> {
        let args = self
            .first_message()?
            .tool_calls
            .as_ref()?
            .first()?
            .function
            .as_ref()?
            .arguments
            .as_ref()?;

        match args {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            other => Some(other),
        }
    }

    /// メッセージ本文
    ///
    /// 文字列の他、`[{"type": "text", "text": ...}]` 形式のパート配列も連結して受け付ける
    pub fn message_text(&self) -> Option<String> {
        let text = match self.first_message()?.content.as_ref()? {
            Value::String(s) => s.clone(),
            Value::Array(parts) => parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(""),
            _ => return None,
        };

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// 画像1枚の解析リクエストを組み立てる
pub fn build_chat_request(profile: &ModelProfile, image: &str) -> ChatRequest {
    let messages = vec![
        ChatMessage {
            role: ChatRole::System,
            content: MessageContent::Text(build_system_prompt()),
        },
        ChatMessage {
            role: ChatRole::User,
            content: MessageContent::Parts(vec![
                ContentPart::Text {
                    text: build_user_instruction(profile.style),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image.to_string(),
                    },
                },
            ]),
        },
    ];

    let (tools, tool_choice) = match profile.style {
        ResponseStyle::ToolCall => (
            Some(vec![Tool {
                kind: "function",
                function: FunctionDefinition {
                    name: ANALYSIS_TOOL_NAME,
                    description: ANALYSIS_TOOL_DESCRIPTION,
                    parameters: analysis_tool_parameters(),
                },
            }]),
            Some(ToolChoice {
                kind: "function",
                function: ToolChoiceFunction {
                    name: ANALYSIS_TOOL_NAME,
                },
            }),
        ),
        ResponseStyle::JsonText => (None, None),
    };

    ChatRequest {
        model: profile.model.clone(),
        messages,
        tools,
        tool_choice,
    }
}

/// 上流の生レスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReply {
    pub status: u16,
    pub body: String,
}

impl GatewayReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 上流 completion API の呼び出し口
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<GatewayReply>;
}

/// HTTPでゲートウェイを呼ぶ本番実装
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpGateway {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl CompletionClient for HttpGateway {
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<GatewayReply> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(GatewayReply { status, body })
    }
}
