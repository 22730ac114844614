use async_trait::async_trait;

use super::error::LlmError;

/// One chat-completion exchange: a system instruction plus a user prompt.
#[derive(Debug, Clone)]
pub struct ChatCompletionRequest {
    pub system: String,
    pub user: String,
    /// Sampling temperature: low for extraction, higher for generation.
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Transport seam for the chat-completions provider.
#[async_trait]
pub trait ChatCompletionApi: Send + Sync {
    /// Returns the completion text, or `None` when the provider answered
    /// without any content.
    async fn complete(&self, req: &ChatCompletionRequest) -> Result<Option<String>, LlmError>;
}
