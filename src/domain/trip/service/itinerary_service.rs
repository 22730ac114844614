//! AI itinerary generation.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use serde_json::Value;
use tracing::info;

use crate::core::llm::chat_api::{ChatCompletionApi, ChatCompletionRequest};
use crate::core::llm::error::LlmError;
use crate::core::llm::structured;
use crate::domain::trip::model::{Itinerary, TripParameters};

const SYSTEM_PROMPT: &str = "You are a professional travel planner who designs detailed day-by-day itineraries. Your reply must be a valid JSON document.";

/// Creative but not wildly random.
const GENERATION_TEMPERATURE: f32 = 0.7;
const GENERATION_MAX_TOKENS: u32 = 4000;

/// Inclusive span in days; a same-day trip counts as 1.
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Produce a schema-valid itinerary for the given trip parameters, or fail
/// with a typed error the API layer can map to a user-facing category.
pub async fn generate_itinerary(
    api: &dyn ChatCompletionApi,
    max_attempts: usize,
    params: &TripParameters,
) -> Result<Itinerary> {
    let day_count = inclusive_day_count(params.start_date, params.end_date);
    if day_count < 1 {
        anyhow::bail!(
            "trip end date {} precedes start date {}",
            params.end_date,
            params.start_date
        );
    }

    let req = ChatCompletionRequest {
        system: SYSTEM_PROMPT.to_string(),
        user: build_itinerary_prompt(params, day_count),
        temperature: GENERATION_TEMPERATURE,
        max_tokens: GENERATION_MAX_TOKENS,
    };

    let value = structured::request_value(api, &req, max_attempts).await?;
    validate_days_field(&value)?;

    let itinerary: Itinerary = structured::decode(value)?;
    validate_day_sequence(&itinerary, params.start_date, day_count)?;

    info!(destination = %params.destination, days = day_count, "generated itinerary");
    Ok(itinerary)
}

fn build_itinerary_prompt(params: &TripParameters, day_count: i64) -> String {
    let mut details = vec![
        format!("- Destination: {}", params.destination),
        format!("- Start date: {}", params.start_date),
        format!("- End date: {}", params.end_date),
        format!("- Duration: {} days", day_count),
        format!("- Travelers: {}", params.traveler_count),
    ];

    if let Some(budget) = params.budget_total {
        details.push(format!("- Budget: {} {}", budget, params.currency));
    }

    if let Some(prefs) = params.preferences.as_deref() {
        details.push(format!("- Preferences: {}", prefs));
    }

    format!(
        r#"Plan a trip with the following details:
{details}

Produce a complete day-by-day plan covering:
1. Activities for every day (sights, experiences, transport) with time, name, location, a short description and an estimated cost
2. Meal recommendations (breakfast, lunch, dinner)
3. An accommodation suggestion per day
4. Notes for each day
5. Travel tips
6. An estimated total cost

Return a JSON document with exactly this structure:
{{
  "summary": "trip overview",
  "days": [
    {{
      "day": 1,
      "date": "{start}",
      "title": "day title",
      "activities": [
        {{
          "time": "09:00",
          "activity": "activity name",
          "location": "specific place",
          "description": "what happens there",
          "estimatedCost": 100
        }}
      ],
      "meals": {{ "breakfast": "...", "lunch": "...", "dinner": "..." }},
      "accommodation": "where to stay",
      "notes": "reminders for the day"
    }}
  ],
  "tips": ["tip 1", "tip 2"],
  "estimatedTotalCost": 5000
}}

The "days" array must contain exactly {day_count} entries, numbered from 1, with consecutive calendar dates starting at {start}.
Return only the JSON document, with no surrounding prose or explanation."#,
        details = details.join("\n"),
        start = params.start_date,
        day_count = day_count,
    )
}

/// The one non-negotiable shape requirement: a non-empty days array.
fn validate_days_field(value: &Value) -> Result<(), LlmError> {
    match value.get("days") {
        Some(days) => match days.as_array() {
            Some(days) if !days.is_empty() => Ok(()),
            Some(_) => Err(LlmError::InvalidShape("days array is empty".into())),
            None => Err(LlmError::InvalidShape("days is not an array".into())),
        },
        None => Err(LlmError::InvalidShape("missing days array".into())),
    }
}

/// Reject plans whose day numbering or dates disagree with the request; a
/// mismatched plan would silently corrupt the per-day calendar downstream.
fn validate_day_sequence(
    itinerary: &Itinerary,
    start: NaiveDate,
    day_count: i64,
) -> Result<(), LlmError> {
    if itinerary.days.len() as i64 != day_count {
        return Err(LlmError::InvalidShape(format!(
            "expected {} days, got {}",
            day_count,
            itinerary.days.len()
        )));
    }

    for (i, day) in itinerary.days.iter().enumerate() {
        let expected_day = i as u32 + 1;
        let expected_date = start + Duration::days(i as i64);

        if day.day != expected_day {
            return Err(LlmError::InvalidShape(format!(
                "day {} is numbered {}",
                expected_day, day.day
            )));
        }

        if day.date != expected_date {
            return Err(LlmError::InvalidShape(format!(
                "day {} is dated {}, expected {}",
                expected_day, day.date, expected_date
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    struct ScriptedChatApi {
        replies: Mutex<VecDeque<String>>,
    }

    impl ScriptedChatApi {
        fn new(replies: Vec<String>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
            }
        }
    }

    #[async_trait]
    impl ChatCompletionApi for ScriptedChatApi {
        async fn complete(
            &self,
            _req: &ChatCompletionRequest,
        ) -> Result<Option<String>, LlmError> {
            Ok(self.replies.lock().unwrap().pop_front())
        }
    }

    fn tokyo_params() -> TripParameters {
        TripParameters {
            destination: "Tokyo".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            traveler_count: 2,
            budget_total: Some(5000.0),
            currency: "CNY".into(),
            preferences: None,
        }
    }

    fn tokyo_itinerary_json() -> String {
        json!({
            "summary": "Three days in Tokyo",
            "days": [
                {
                    "day": 1,
                    "date": "2025-06-01",
                    "title": "Asakusa",
                    "activities": [
                        {"time": "09:00", "activity": "Temple visit", "location": "Senso-ji Temple", "estimatedCost": 0}
                    ],
                    "meals": {"lunch": "Ramen near the temple"}
                },
                {
                    "day": 2,
                    "date": "2025-06-02",
                    "title": "Shibuya",
                    "activities": [
                        {"time": "10:00", "activity": "Crossing and shopping", "location": "Shibuya Crossing"}
                    ],
                    "meals": {}
                },
                {
                    "day": 3,
                    "date": "2025-06-03",
                    "title": "Tokyo Tower",
                    "activities": [
                        {"time": "09:30", "activity": "Observation deck", "location": "Tokyo Tower", "estimatedCost": 150}
                    ],
                    "meals": {}
                }
            ],
            "tips": ["Get a Suica card"],
            "estimatedTotalCost": 4200
        })
        .to_string()
    }

    #[test]
    fn day_count_is_inclusive() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(inclusive_day_count(start, start), 1);
        assert_eq!(
            inclusive_day_count(start, NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()),
            3
        );
    }

    #[test]
    fn prompt_states_trip_facts_and_json_only_instruction() {
        let prompt = build_itinerary_prompt(&tokyo_params(), 3);
        assert!(prompt.contains("Destination: Tokyo"));
        assert!(prompt.contains("Duration: 3 days"));
        assert!(prompt.contains("Travelers: 2"));
        assert!(prompt.contains("Budget: 5000 CNY"));
        assert!(prompt.contains("exactly 3 entries"));
        assert!(prompt.contains("no surrounding prose"));
    }

    #[tokio::test]
    async fn three_day_trip_yields_three_dated_days() {
        let api = ScriptedChatApi::new(vec![tokyo_itinerary_json()]);

        let itinerary = generate_itinerary(&api, 1, &tokyo_params()).await.unwrap();

        assert_eq!(itinerary.days.len(), 3);
        for (i, day) in itinerary.days.iter().enumerate() {
            assert_eq!(day.day, i as u32 + 1);
            assert_eq!(
                day.date,
                NaiveDate::from_ymd_opt(2025, 6, 1 + i as u32).unwrap()
            );
        }
    }

    #[tokio::test]
    async fn fenced_output_is_accepted() {
        let fenced = format!("```json\n{}\n```", tokyo_itinerary_json());
        let api = ScriptedChatApi::new(vec![fenced]);

        let itinerary = generate_itinerary(&api, 1, &tokyo_params()).await.unwrap();
        assert_eq!(itinerary.days.len(), 3);
    }

    #[tokio::test]
    async fn missing_days_array_is_a_shape_error() {
        let api = ScriptedChatApi::new(vec![json!({"summary": "no plan"}).to_string()]);

        let err = generate_itinerary(&api, 1, &tokyo_params()).await.unwrap_err();
        match err.downcast_ref::<LlmError>() {
            Some(LlmError::InvalidShape(msg)) => assert!(msg.contains("missing days")),
            other => panic!("expected InvalidShape, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_array_days_is_a_shape_error() {
        let api = ScriptedChatApi::new(vec![json!({"days": "see attached"}).to_string()]);

        let err = generate_itinerary(&api, 1, &tokyo_params()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LlmError>(),
            Some(LlmError::InvalidShape(_))
        ));
    }

    #[tokio::test]
    async fn wrong_day_count_is_rejected() {
        let short = json!({
            "summary": "too short",
            "days": [
                {"day": 1, "date": "2025-06-01", "title": "Only day", "activities": [], "meals": {}}
            ]
        })
        .to_string();
        let api = ScriptedChatApi::new(vec![short]);

        let err = generate_itinerary(&api, 1, &tokyo_params()).await.unwrap_err();
        match err.downcast_ref::<LlmError>() {
            Some(LlmError::InvalidShape(msg)) => assert!(msg.contains("expected 3 days")),
            other => panic!("expected InvalidShape, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn wrong_dates_are_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(&tokyo_itinerary_json()).unwrap();
        value["days"][2]["date"] = json!("2025-07-03");
        let api = ScriptedChatApi::new(vec![value.to_string()]);

        let err = generate_itinerary(&api, 1, &tokyo_params()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LlmError>(),
            Some(LlmError::InvalidShape(_))
        ));
    }
}
