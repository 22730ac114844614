use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::persistence::trips::trip_entity::TripEntity;
use crate::domain::trip::dto::create_trip_request::CreateTripRequest;
use crate::domain::trip::dto::parse_voice_request::ParseVoiceRequest;
use crate::domain::trip::dto::update_trip_request::UpdateTripRequest;
use crate::domain::trip::model::ParsedTripInfo;
use crate::errors::AppError;

pub struct TripController;

impl TripController {
    pub async fn create_trip(
        State(state): State<AppState>,
        Json(payload): Json<CreateTripRequest>,
    ) -> Result<Json<ApiResponse<TripEntity>>, AppError> {
        to_json(state.trip_service.create_trip(payload).await)
    }

    pub async fn list_trips(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Vec<TripEntity>>>, AppError> {
        to_json(state.trip_service.list_trips().await)
    }

    pub async fn get_trip(
        State(state): State<AppState>,
        Path(id): Path<Uuid>,
    ) -> Result<Json<ApiResponse<TripEntity>>, AppError> {
        to_json(state.trip_service.get_trip(id).await)
    }

    pub async fn update_trip(
        State(state): State<AppState>,
        Path(id): Path<Uuid>,
        Json(payload): Json<UpdateTripRequest>,
    ) -> Result<Json<ApiResponse<TripEntity>>, AppError> {
        to_json(state.trip_service.update_trip(id, payload).await)
    }

    pub async fn delete_trip(
        State(state): State<AppState>,
        Path(id): Path<Uuid>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.trip_service.delete_trip(id).await)
    }

    /// Generate, enrich and store an itinerary for the trip.
    pub async fn generate_itinerary(
        State(state): State<AppState>,
        Path(id): Path<Uuid>,
    ) -> Result<Json<ApiResponse<TripEntity>>, AppError> {
        to_json(state.planner_service.generate_itinerary(id).await)
    }

    /// Extract trip parameters from a transcribed utterance. Runs before a
    /// trip exists, so there is no id in the path.
    pub async fn parse_voice(
        State(state): State<AppState>,
        Json(payload): Json<ParseVoiceRequest>,
    ) -> Result<Json<ApiResponse<ParsedTripInfo>>, AppError> {
        to_json(state.planner_service.parse_voice(payload).await)
    }
}
