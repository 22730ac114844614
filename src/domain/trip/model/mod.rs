//! Trip-planning domain documents.
//!
//! Serialized camelCase: these shapes are the wire contract shared between the
//! LLM prompt, the REST API and the stored itinerary document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Input to itinerary generation, loaded from a trip record.
#[derive(Debug, Clone)]
pub struct TripParameters {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub traveler_count: u32,
    pub budget_total: Option<f64>,
    pub currency: String,
    pub preferences: Option<String>,
}

/// Longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

/// A single scheduled event within a day, optionally tied to a place.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Time of day, "HH:MM".
    pub time: String,
    pub activity: String,
    /// Free-text place description; the join key used for geocoding.
    pub location: Option<String>,
    pub description: Option<String>,
    pub estimated_cost: Option<f64>,
    /// Absent until enrichment resolves the location.
    pub coordinates: Option<Coordinates>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    /// 1-based day number.
    pub day: u32,
    pub date: NaiveDate,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub meals: Meals,
    pub accommodation: Option<String>,
    pub notes: Option<String>,
}

/// The generated multi-day plan; regeneration fully replaces it.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    #[serde(default)]
    pub summary: String,
    pub days: Vec<ItineraryDay>,
    #[serde(default)]
    pub tips: Vec<String>,
    pub estimated_total_cost: Option<f64>,
}

/// Best-effort extraction from a voice utterance; absent fields were simply
/// not mentioned.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTripInfo {
    pub title: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub traveler_count: Option<u32>,
    pub budget_total: Option<f64>,
    pub preferences: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn itinerary_decodes_from_sparse_model_output() {
        // Models routinely omit optional sections; only days is mandatory.
        let itinerary: Itinerary = serde_json::from_str(
            r#"{
                "days": [
                    {
                        "day": 1,
                        "date": "2025-06-01",
                        "activities": [
                            {"time": "09:00", "activity": "Temple visit", "location": "Senso-ji"}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(itinerary.summary, "");
        assert!(itinerary.tips.is_empty());
        assert_eq!(itinerary.days[0].activities[0].location.as_deref(), Some("Senso-ji"));
        assert!(itinerary.days[0].activities[0].coordinates.is_none());
        assert!(itinerary.days[0].meals.breakfast.is_none());
    }

    #[test]
    fn optional_fields_vanish_from_serialized_documents() {
        let activity = Activity {
            time: "09:00".into(),
            activity: "Walk".into(),
            location: None,
            description: None,
            estimated_cost: None,
            coordinates: None,
        };

        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 2);
        assert!(json.get("coordinates").is_none());
    }
}
