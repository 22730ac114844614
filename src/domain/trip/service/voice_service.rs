//! Voice-utterance extraction of trip parameters.

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use serde_json::Value;
use validator::Validate;

use crate::core::llm::chat_api::{ChatCompletionApi, ChatCompletionRequest};
use crate::core::llm::structured;
use crate::domain::trip::dto::parse_voice_request::ParseVoiceRequest;
use crate::domain::trip::model::ParsedTripInfo;

const SYSTEM_PROMPT: &str = "You are a travel-information extraction assistant. You read a natural-language trip description and return the extracted fields as a JSON document.";

/// Near-deterministic: extraction, not generation.
const EXTRACTION_TEMPERATURE: f32 = 0.3;
const EXTRACTION_MAX_TOKENS: u32 = 500;

pub async fn parse_voice(
    api: &dyn ChatCompletionApi,
    max_attempts: usize,
    payload: ParseVoiceRequest,
) -> Result<ParsedTripInfo> {
    payload.validate()?;
    parse_voice_at(api, max_attempts, &payload.text, Utc::now().date_naive()).await
}

/// `today` anchors the derived date range.
pub async fn parse_voice_at(
    api: &dyn ChatCompletionApi,
    max_attempts: usize,
    text: &str,
    today: NaiveDate,
) -> Result<ParsedTripInfo> {
    let req = ChatCompletionRequest {
        system: SYSTEM_PROMPT.to_string(),
        user: build_extraction_prompt(text),
        temperature: EXTRACTION_TEMPERATURE,
        max_tokens: EXTRACTION_MAX_TOKENS,
    };

    let value = structured::request_value(api, &req, max_attempts).await?;
    Ok(build_trip_info(&value, today))
}

fn build_extraction_prompt(text: &str) -> String {
    format!(
        r#"Extract travel information from the following description.

Description: {text}

Extract these fields, leaving out any the description does not mention:
1. destination - city or region name
2. days - trip length in days
3. travelerCount - number of travelers
4. budgetTotal - total budget as a plain number
5. preferences - interests or preferences mentioned

Return a JSON document like:
{{
  "destination": "Osaka",
  "days": 5,
  "travelerCount": 2,
  "budgetTotal": 10000,
  "preferences": "food, culture"
}}

Rules:
- Convert magnitude words to literal numbers (1万 = 10000, 5千 = 5000)
- Convert spelled-out numbers to digits ("five days" = 5, "两个人" = 2)
- Return only the JSON document, no other text"#
    )
}

/// Best-effort mapping; anything missing or malformed is simply omitted.
fn build_trip_info(value: &Value, today: NaiveDate) -> ParsedTripInfo {
    let mut info = ParsedTripInfo::default();

    let destination = value
        .get("destination")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let days = value.get("days").and_then(as_u32_lenient).filter(|d| *d >= 1);

    if let Some(dest) = destination {
        info.destination = Some(dest.to_string());
        info.title = Some(match days {
            Some(d) => format!("{} {}-Day Trip", dest, d),
            None => format!("{} Trip", dest),
        });
    }

    if let Some(d) = days {
        info.start_date = Some(today);
        info.end_date = Some(today + Duration::days(d as i64 - 1));
    }

    info.traveler_count = value.get("travelerCount").and_then(as_u32_lenient);
    info.budget_total = value.get("budgetTotal").and_then(as_f64_lenient);
    info.preferences = value
        .get("preferences")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    info
}

/// The model is asked for plain numbers but occasionally quotes them.
fn as_u32_lenient(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_f64_lenient(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use crate::core::llm::error::LlmError;

    use super::*;

    struct CannedChatApi {
        reply: String,
    }

    #[async_trait]
    impl ChatCompletionApi for CannedChatApi {
        async fn complete(
            &self,
            _req: &ChatCompletionRequest,
        ) -> Result<Option<String>, LlmError> {
            Ok(Some(self.reply.clone()))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn chinese_utterance_maps_to_full_parameters() {
        // Model output for "我想去日本，5天，预算1万元，2个人".
        let api = CannedChatApi {
            reply: json!({
                "destination": "日本",
                "days": 5,
                "travelerCount": 2,
                "budgetTotal": 10000,
                "preferences": "美食"
            })
            .to_string(),
        };

        let info = parse_voice_at(&api, 1, "我想去日本，5天，预算1万元，2个人", today())
            .await
            .unwrap();

        assert_eq!(info.destination.as_deref(), Some("日本"));
        assert_eq!(info.title.as_deref(), Some("日本 5-Day Trip"));
        assert_eq!(info.start_date, Some(today()));
        assert_eq!(info.end_date, NaiveDate::from_ymd_opt(2025, 6, 5));
        assert_eq!(info.traveler_count, Some(2));
        assert_eq!(info.budget_total, Some(10000.0));
        assert_eq!(info.preferences.as_deref(), Some("美食"));
    }

    #[tokio::test]
    async fn absent_fields_are_omitted_without_error() {
        let api = CannedChatApi {
            reply: json!({"destination": "Osaka"}).to_string(),
        };

        let info = parse_voice_at(&api, 1, "I want to visit Osaka", today())
            .await
            .unwrap();

        assert_eq!(info.destination.as_deref(), Some("Osaka"));
        assert_eq!(info.title.as_deref(), Some("Osaka Trip"));
        assert!(info.start_date.is_none());
        assert!(info.end_date.is_none());
        assert!(info.traveler_count.is_none());
        assert!(info.budget_total.is_none());
        assert!(info.preferences.is_none());
    }

    #[tokio::test]
    async fn quoted_numbers_are_tolerated() {
        let api = CannedChatApi {
            reply: json!({"days": "3", "travelerCount": "4", "budgetTotal": "2500.5"}).to_string(),
        };

        let info = parse_voice_at(&api, 1, "three days, four of us", today())
            .await
            .unwrap();

        assert_eq!(info.start_date, Some(today()));
        assert_eq!(info.end_date, NaiveDate::from_ymd_opt(2025, 6, 3));
        assert_eq!(info.traveler_count, Some(4));
        assert_eq!(info.budget_total, Some(2500.5));
        // No destination means no synthesized title.
        assert!(info.title.is_none());
    }

    #[test]
    fn extraction_prompt_embeds_the_utterance() {
        let prompt = build_extraction_prompt("两个人去成都玩三天");
        assert!(prompt.contains("两个人去成都玩三天"));
        assert!(prompt.contains("only the JSON document"));
    }
}
