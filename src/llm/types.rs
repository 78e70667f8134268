use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LLMError {
    #[error("API key is not set")]
    MissingApiKey,

    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimit { retry_after_secs: u32 },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Provider error: {status} - {message}")]
    ProviderError { status: u16, message: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Timeout after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    #[error("Parse error: {message}")]
    ParseError { message: String },
}

/// `GET /models` response body
#[derive(Debug, Deserialize)]
pub(crate) struct ModelsResponse {
    #[serde(default)]
    pub data: Vec<ModelObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelObject {
    pub id: String,
}
