use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use crate::domain::trip::dto::create_trip_request::CreateTripRequest;
use crate::domain::trip::dto::update_trip_request::UpdateTripRequest;
use crate::domain::trip::model::{Itinerary, TripParameters};

pub const DEFAULT_CURRENCY: &str = "CNY";

/// Trip lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Planning,
    Ongoing,
    Completed,
}

/// A stored trip record. The generated itinerary rides along as an optional
/// document that regeneration fully replaces.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripEntity {
    pub id: Uuid,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub traveler_count: u32,
    pub budget_total: Option<f64>,
    pub currency: String,
    pub status: TripStatus,
    pub preferences: Option<String>,
    pub itinerary: Option<Itinerary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TripEntity {
    pub fn from_create(req: CreateTripRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: req.title,
            destination: req.destination,
            start_date: req.start_date,
            end_date: req.end_date,
            traveler_count: req.traveler_count,
            budget_total: req.budget_total,
            currency: req.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            status: TripStatus::Planning,
            preferences: req.preferences,
            itinerary: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, req: UpdateTripRequest) {
        if let Some(v) = req.title {
            self.title = v;
        }

        if let Some(v) = req.destination {
            self.destination = v;
        }

        if let Some(v) = req.start_date {
            self.start_date = v;
        }

        if let Some(v) = req.end_date {
            self.end_date = v;
        }

        if let Some(v) = req.traveler_count {
            self.traveler_count = v;
        }

        if let Some(v) = req.budget_total {
            self.budget_total = Some(v);
        }

        if let Some(v) = req.currency {
            self.currency = v;
        }

        if let Some(v) = req.status {
            self.status = v;
        }

        if let Some(v) = req.preferences {
            self.preferences = Some(v);
        }

        if let Some(v) = req.itinerary {
            self.itinerary = Some(v);
        }

        self.updated_at = Utc::now();
    }

    /// Generation input loaded from this record.
    pub fn parameters(&self) -> TripParameters {
        TripParameters {
            destination: self.destination.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            traveler_count: self.traveler_count,
            budget_total: self.budget_total,
            currency: self.currency.clone(),
            preferences: self.preferences.clone(),
        }
    }
}
