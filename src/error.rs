use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("No image provided")]
    MissingInput,

    #[error("AI_GATEWAY_API_KEY is not configured")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rate limit exceeded. Please try again shortly.")]
    RateLimited,

    #[error("Usage limit reached. Please top up credits.")]
    QuotaExceeded,

    #[error("AI gateway error: {status}")]
    Upstream { status: u16, body: String },

    #[error("AI gateway returned an empty response")]
    EmptyUpstreamResponse,

    #[error("AI gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] skin_triage_common::Error),
}

pub type Result<T> = std::result::Result<T, TriageError>;
