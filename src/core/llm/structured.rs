//! Recovery of structured JSON documents from free-text completions.
//!
//! The model is instructed to answer with bare JSON, but completions routinely
//! arrive wrapped in a markdown code fence. The recognized grammar: an optional
//! leading ``` fence line (with or without a language tag) and an optional
//! trailing ``` fence line around the document.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::chat_api::{ChatCompletionApi, ChatCompletionRequest};
use super::error::LlmError;

/// Delay between attempts at a retryable failure.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Ask the model for a JSON document and parse it, retrying empty or
/// non-JSON completions up to `max_attempts` attempts in total.
pub async fn request_value(
    api: &dyn ChatCompletionApi,
    req: &ChatCompletionRequest,
    max_attempts: usize,
) -> Result<Value, LlmError> {
    let attempts = max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match try_request_value(api, req).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < attempts => {
                warn!(attempt, error = %err, "retrying structured completion");
                tokio::time::sleep(RETRY_BACKOFF).await;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn try_request_value(
    api: &dyn ChatCompletionApi,
    req: &ChatCompletionRequest,
) -> Result<Value, LlmError> {
    let text = api.complete(req).await?.ok_or(LlmError::EmptyResponse)?;
    parse_json_payload(&text)
}

/// Parse a completion into JSON, tolerating a fenced code block wrapper.
pub fn parse_json_payload(text: &str) -> Result<Value, LlmError> {
    let stripped = strip_code_fences(text.trim());
    serde_json::from_str(stripped).map_err(|e| LlmError::InvalidJson(e.to_string()))
}

/// Remove a leading ``` or ```json fence line and the trailing ``` fence.
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // The rest of the fence line is an optional language tag; drop it.
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return text,
    };

    let body = body.trim_end();
    body.strip_suffix("```").map(str::trim_end).unwrap_or(body)
}

/// Decode a parsed document into the expected type; mismatches are shape
/// failures, distinct from JSON failures.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, LlmError> {
    serde_json::from_value(value).map_err(|e| LlmError::InvalidShape(e.to_string()))
}
