//! Trip routes (e.g., /api/v1/trips/*)

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::controller::trip::TripController;
use crate::app_state::AppState;

pub fn trip_routes() -> Router<AppState> {
    Router::new()
        .route("/parse-voice", post(TripController::parse_voice))
        .route(
            "/",
            post(TripController::create_trip).get(TripController::list_trips),
        )
        .route(
            "/{id}",
            get(TripController::get_trip)
                .put(TripController::update_trip)
                .delete(TripController::delete_trip),
        )
        .route("/{id}/generate", post(TripController::generate_itinerary))
}
