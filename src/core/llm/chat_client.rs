use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::core::config::AiConfig;

use super::chat_api::{ChatCompletionApi, ChatCompletionRequest};
use super::error::LlmError;

/// Chat-completions client for the DashScope OpenAI-compatible endpoint.
pub struct DashScopeChatClient {
    http: Client,
    cfg: AiConfig,
}

impl DashScopeChatClient {
    pub fn new(cfg: AiConfig) -> Self {
        // Building a client only fails on TLS backend initialization problems;
        // fall back to a default client (without the configured timeout) then.
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { http, cfg }
    }

    fn endpoint(&self) -> String {
        let trimmed = self.cfg.base_url.trim_end_matches('/');
        if trimmed.ends_with("/chat/completions") {
            trimmed.to_string()
        } else {
            format!("{}/chat/completions", trimmed)
        }
    }
}

#[async_trait]
impl ChatCompletionApi for DashScopeChatClient {
    async fn complete(&self, req: &ChatCompletionRequest) -> Result<Option<String>, LlmError> {
        // Fail fast, before any network traffic.
        let key = self.cfg.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        let body = serde_json::json!({
            "model": self.cfg.model.as_str(),
            "messages": [
                { "role": "system", "content": req.system.as_str() },
                { "role": "user", "content": req.user.as_str() },
            ],
            "temperature": req.temperature,
            "max_tokens": req.max_tokens,
        });

        let url = self.endpoint();
        debug!(model = %self.cfg.model, temperature = req.temperature, "sending chat completion request");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(format!("failed to call {}: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmError::Transport(format!(
                "provider returned {}: {}",
                status, text
            )));
        }

        let completion: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Transport(format!("failed to decode provider response: {}", e)))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> DashScopeChatClient {
        DashScopeChatClient::new(AiConfig {
            api_key: None,
            base_url: base_url.to_string(),
            model: "qwen-plus".into(),
            timeout_ms: 1_000,
            max_attempts: 1,
        })
    }

    #[test]
    fn endpoint_appends_chat_completions_once() {
        assert_eq!(
            client("https://dashscope.aliyuncs.com/compatible-mode/v1").endpoint(),
            "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions"
        );
        assert_eq!(
            client("https://example.com/v1/chat/completions").endpoint(),
            "https://example.com/v1/chat/completions"
        );
        assert_eq!(
            client("https://example.com/v1/").endpoint(),
            "https://example.com/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_network_call() {
        let api = client("http://127.0.0.1:1/v1");
        let req = ChatCompletionRequest {
            system: "s".into(),
            user: "u".into(),
            temperature: 0.0,
            max_tokens: 16,
        };

        let err = api.complete(&req).await.unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }

    #[test]
    fn response_decoding_tolerates_missing_content() {
        let parsed: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(empty.choices.is_empty());
    }
}
