//! Trip CRUD and the generate-then-enrich workflow.

use std::time::Duration;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::core::geocode::GeocodeApi;
use crate::core::llm::chat_api::ChatCompletionApi;
use crate::core::persistence::trips::trip_api_repository_trait::TripApiRepository;
use crate::core::persistence::trips::trip_entity::TripEntity;
use crate::domain::trip::dto::create_trip_request::CreateTripRequest;
use crate::domain::trip::dto::update_trip_request::UpdateTripRequest;
use crate::domain::trip::service::{enrichment_service, itinerary_service};
use crate::errors::AppError;

pub async fn create_trip<R: TripApiRepository>(
    repo: &R,
    req: CreateTripRequest,
) -> Result<TripEntity> {
    req.validate()?;
    if req.end_date < req.start_date {
        return Err(AppError::BadRequest("endDate precedes startDate".into()).into());
    }

    let trip = TripEntity::from_create(req);
    repo.write(&trip)?;
    Ok(trip)
}

pub async fn get_trip<R: TripApiRepository>(repo: &R, id: Uuid) -> Result<TripEntity> {
    repo.read(id)?
        .ok_or_else(|| AppError::NotFound("Trip not found".into()).into())
}

pub async fn list_trips<R: TripApiRepository>(repo: &R) -> Result<Vec<TripEntity>> {
    repo.list()
}

pub async fn update_trip<R: TripApiRepository>(
    repo: &R,
    id: Uuid,
    req: UpdateTripRequest,
) -> Result<TripEntity> {
    req.validate()?;

    let mut trip = get_trip(repo, id).await?;
    trip.apply_update(req);
    if trip.end_date < trip.start_date {
        return Err(AppError::BadRequest("endDate precedes startDate".into()).into());
    }

    repo.write(&trip)?;
    Ok(trip)
}

pub async fn delete_trip<R: TripApiRepository>(repo: &R, id: Uuid) -> Result<Value> {
    let trip = get_trip(repo, id).await?;
    repo.delete(trip.id)?;
    Ok(json!({ "message": "Trip deleted successfully" }))
}

/// The core workflow. Generation always completes before enrichment starts,
/// and the merged document fully replaces any previous itinerary on the trip.
pub async fn generate_itinerary_for_trip<R: TripApiRepository>(
    repo: &R,
    chat: &dyn ChatCompletionApi,
    geocoder: &dyn GeocodeApi,
    geocode_spacing: Duration,
    llm_attempts: usize,
    id: Uuid,
) -> Result<TripEntity> {
    let mut trip = get_trip(repo, id).await?;
    let params = trip.parameters();

    let mut itinerary = itinerary_service::generate_itinerary(chat, llm_attempts, &params).await?;
    enrichment_service::enrich_itinerary(geocoder, &params.destination, &mut itinerary, geocode_spacing)
        .await;

    trip.itinerary = Some(itinerary);
    trip.updated_at = chrono::Utc::now();
    repo.write(&trip)?;

    info!(trip_id = %trip.id, "stored generated itinerary");
    Ok(trip)
}
