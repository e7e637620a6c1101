//! テスト用のスタブゲートウェイ

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use skin_triage::analyzer::gateway::ChatRequest;
use skin_triage::analyzer::{Analyzer, CompletionClient, GatewayReply};
use skin_triage::config::Config;
use skin_triage::error::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 固定レスポンスを返し、呼び出し回数と最後のリクエストを記録する
#[derive(Clone)]
pub struct StubGateway {
    reply: GatewayReply,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<Value>>>,
}

impl StubGateway {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            reply: GatewayReply::new(status, body),
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, body.to_string())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<Value> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubGateway {
    async fn complete(&self, _api_key: &str, request: &ChatRequest) -> Result<GatewayReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(serde_json::to_value(request).unwrap());
        Ok(self.reply.clone())
    }
}

pub fn test_config() -> Config {
    Config {
        api_key: Some("test-key".to_string()),
        ..Default::default()
    }
}

pub fn analyzer(stub: &StubGateway) -> Analyzer<StubGateway> {
    Analyzer::new(test_config(), stub.clone())
}

/// ツール呼び出し形式のレスポンス
pub fn tool_call_response(arguments: &str) -> Value {
    json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": { "name": "report_skin_analysis", "arguments": arguments }
                }]
            }
        }]
    })
}

/// テキスト形式のレスポンス
pub fn text_response(content: &str) -> Value {
    json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

pub fn complete_result_json() -> Value {
    json!({
        "disease": "Psoriasis",
        "confidence": 87,
        "description": "A chronic autoimmune condition causing scaly patches.",
        "symptoms": ["Red patches", "Silvery scales", "Itching"],
        "remedies": ["Moisturize", "Topical corticosteroids"],
        "whenToSeeDoctor": "If patches spread or joints become painful.",
        "prevention": ["Avoid skin injury", "Manage stress"]
    })
}

pub const IMAGE_URL: &str = "https://storage.example.com/skin/rash.jpg";
