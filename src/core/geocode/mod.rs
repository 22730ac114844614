//! Outbound geocoding: seam trait plus the AMAP implementation.

pub mod amap_client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::trip::model::Coordinates;

/// A resolved address: coordinates plus the provider's normalized label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub location: Coordinates,
    pub formatted_address: String,
}

/// Seam for single-address geocoding, scoped to a city/region. A miss, a
/// missing key, or a transport failure (already logged by the implementation)
/// is `None`, never an error: absent coordinates are an expected outcome.
#[async_trait]
pub trait GeocodeApi: Send + Sync {
    async fn geocode(&self, city: &str, address: &str) -> Option<GeocodeResult>;
}
