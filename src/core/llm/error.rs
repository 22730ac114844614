use thiserror::Error;

/// Failure taxonomy for structured LLM calls.
///
/// `EmptyResponse` and `InvalidJson` are retryable with the same prompt.
/// `NotConfigured` requires operator intervention. `InvalidShape` means the
/// payload parsed but does not satisfy the expected document structure.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("AI service not configured: set DASHSCOPE_API_KEY or ALIYUN_API_KEY")]
    NotConfigured,

    #[error("AI service returned no content")]
    EmptyResponse,

    #[error("AI response was not valid JSON: {0}")]
    InvalidJson(String),

    #[error("AI response has an invalid structure: {0}")]
    InvalidShape(String),

    #[error("AI request failed: {0}")]
    Transport(String),
}

impl LlmError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, LlmError::EmptyResponse | LlmError::InvalidJson(_))
    }
}
