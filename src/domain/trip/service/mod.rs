pub mod enrichment_service;
pub mod itinerary_service;
pub mod trip_service;
pub mod voice_service;
