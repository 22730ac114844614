use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::persistence::trips::trip_entity::TripStatus;
use crate::domain::trip::model::Itinerary;

/// Partial trip update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTripRequest {
    pub title: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub traveler_count: Option<u32>,
    pub budget_total: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<TripStatus>,
    pub preferences: Option<String>,
    pub itinerary: Option<Itinerary>,
}
