//! HTTPサーバー
//!
//! - POST /analyze-skin（および POST /）: 画像解析
//! - GET /conditions: 疾患カテゴリ一覧
//! - GET /health: 稼働確認
//!
//! CORSは全オリジン許可。エラーは `{ "error": string }` で返す。

use crate::analyzer::{Analyzer, CompletionClient};
use crate::error::{Result, TriageError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use skin_triage_common::{AnalysisRequest, AnalysisResult, ConditionCategory, CONDITION_CATEGORIES};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// プリフライトで許可するリクエストヘッダ
pub const CORS_ALLOW_HEADERS: &[&str] = &[
    "authorization",
    "x-client-info",
    "apikey",
    "content-type",
    "x-supabase-client-platform",
    "x-supabase-client-platform-version",
    "x-supabase-client-runtime",
    "x-supabase-client-runtime-version",
];

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl TriageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TriageError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            TriageError::QuotaExceeded => StatusCode::PAYMENT_REQUIRED,
            TriageError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TriageError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn cors_layer() -> CorsLayer {
    let headers: Vec<HeaderName> = CORS_ALLOW_HEADERS
        .iter()
        .map(|h| HeaderName::from_static(h))
        .collect();

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers(headers)
}

/// ルーター構築
pub fn router<C>(analyzer: Arc<Analyzer<C>>) -> Router
where
    C: CompletionClient + 'static,
{
    let body_limit = analyzer.config().max_body_bytes;

    Router::new()
        .route("/", post(analyze_skin::<C>).options(preflight))
        .route("/analyze-skin", post(analyze_skin::<C>).options(preflight))
        .route("/conditions", get(conditions))
        .route("/health", get(health::<C>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(analyzer)
}

async fn analyze_skin<C>(
    State(analyzer): State<Arc<Analyzer<C>>>,
    payload: std::result::Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>>
where
    C: CompletionClient + 'static,
{
    let Json(request) = payload.map_err(|e| TriageError::InvalidRequest(e.body_text()))?;
    let image = request.image.unwrap_or_default();
    let result = analyzer.analyze(&image).await?;
    Ok(Json(result))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn conditions() -> Json<&'static [ConditionCategory]> {
    Json(CONDITION_CATEGORIES)
}

async fn health<C>(State(analyzer): State<Arc<Analyzer<C>>>) -> Json<Value>
where
    C: CompletionClient + 'static,
{
    let config = analyzer.config();
    Json(json!({
        "status": "ok",
        "model": config.model,
        "responseStyle": config.response_style,
    }))
}

/// サーバー起動（Ctrl-Cで停止）
pub async fn serve<C>(analyzer: Arc<Analyzer<C>>, host: &str, port: u16) -> Result<()>
where
    C: CompletionClient + 'static,
{
    let app = router(analyzer);
    let listen_address = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&listen_address).await?;

    info!("Server listening on http://{listen_address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
