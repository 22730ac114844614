use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::core::config::AppConfig;
use crate::core::geocode::amap_client::AmapGeocodeClient;
use crate::core::geocode::GeocodeApi;
use crate::core::llm::chat_api::ChatCompletionApi;
use crate::core::llm::chat_client::DashScopeChatClient;
use crate::core::persistence::trips::trip_entity::TripEntity;
use crate::core::persistence::trips::trip_repository::TripRepository;
use crate::domain::trip::dto::create_trip_request::CreateTripRequest;
use crate::domain::trip::dto::parse_voice_request::ParseVoiceRequest;
use crate::domain::trip::dto::update_trip_request::UpdateTripRequest;
use crate::domain::trip::model::ParsedTripInfo;

#[derive(Clone)]
pub struct AppState {
    pub trip_service: Arc<TripService>,
    pub planner_service: Arc<PlannerService>,
}

/// Wire outbound clients once at startup and inject them into the services;
/// nothing below this point reads credentials from the environment.
pub fn build_app_state(config: &AppConfig) -> AppState {
    let repo = Arc::new(TripRepository::new(config.data_dir.clone()));
    let chat: Arc<dyn ChatCompletionApi> = Arc::new(DashScopeChatClient::new(config.ai.clone()));
    let geocoder: Arc<dyn GeocodeApi> = Arc::new(AmapGeocodeClient::new(config.geocode.clone()));

    AppState {
        trip_service: Arc::new(TripService { repo: repo.clone() }),
        planner_service: Arc::new(PlannerService {
            repo,
            chat,
            geocoder,
            geocode_spacing: Duration::from_millis(config.geocode.request_spacing_ms),
            llm_attempts: config.ai.max_attempts,
        }),
    }
}

pub struct TripService {
    repo: Arc<TripRepository>,
}

impl TripService {
    pub async fn create_trip(&self, req: CreateTripRequest) -> anyhow::Result<TripEntity> {
        crate::domain::trip::service::trip_service::create_trip(self.repo.as_ref(), req).await
    }

    pub async fn list_trips(&self) -> anyhow::Result<Vec<TripEntity>> {
        crate::domain::trip::service::trip_service::list_trips(self.repo.as_ref()).await
    }

    pub async fn get_trip(&self, id: Uuid) -> anyhow::Result<TripEntity> {
        crate::domain::trip::service::trip_service::get_trip(self.repo.as_ref(), id).await
    }

    pub async fn update_trip(&self, id: Uuid, req: UpdateTripRequest) -> anyhow::Result<TripEntity> {
        crate::domain::trip::service::trip_service::update_trip(self.repo.as_ref(), id, req).await
    }

    pub async fn delete_trip(&self, id: Uuid) -> anyhow::Result<Value> {
        crate::domain::trip::service::trip_service::delete_trip(self.repo.as_ref(), id).await
    }
}

pub struct PlannerService {
    repo: Arc<TripRepository>,
    chat: Arc<dyn ChatCompletionApi>,
    geocoder: Arc<dyn GeocodeApi>,
    geocode_spacing: Duration,
    llm_attempts: usize,
}

impl PlannerService {
    pub async fn generate_itinerary(&self, id: Uuid) -> anyhow::Result<TripEntity> {
        crate::domain::trip::service::trip_service::generate_itinerary_for_trip(
            self.repo.as_ref(),
            self.chat.as_ref(),
            self.geocoder.as_ref(),
            self.geocode_spacing,
            self.llm_attempts,
            id,
        )
        .await
    }

    pub async fn parse_voice(&self, req: ParseVoiceRequest) -> anyhow::Result<ParsedTripInfo> {
        crate::domain::trip::service::voice_service::parse_voice(
            self.chat.as_ref(),
            self.llm_attempts,
            req,
        )
        .await
    }
}
