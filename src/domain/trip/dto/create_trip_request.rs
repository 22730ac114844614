use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Trip creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    #[validate(length(min = 1))]
    pub title: String,

    #[validate(length(min = 1))]
    pub destination: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(range(min = 1))]
    pub traveler_count: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_total: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
}
