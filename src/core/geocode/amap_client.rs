use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::config::GeocodeConfig;
use crate::domain::trip::model::Coordinates;

use super::{GeocodeApi, GeocodeResult};

/// AMAP v3 geocoding client. Every lookup is scoped to a city and the first
/// candidate wins.
pub struct AmapGeocodeClient {
    http: Client,
    cfg: GeocodeConfig,
}

impl AmapGeocodeClient {
    pub fn new(cfg: GeocodeConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { http, cfg }
    }

    async fn lookup(&self, key: &str, city: &str, address: &str) -> anyhow::Result<AmapGeocodeResponse> {
        let query = format!("{} {}", city, address);
        let resp = self
            .http
            .get(&self.cfg.base_url)
            .query(&[("key", key), ("address", query.as_str()), ("city", city)])
            .send()
            .await?;
        Ok(resp.error_for_status()?.json().await?)
    }
}

#[async_trait]
impl GeocodeApi for AmapGeocodeClient {
    async fn geocode(&self, city: &str, address: &str) -> Option<GeocodeResult> {
        let Some(key) = self.cfg.api_key.as_deref() else {
            warn!("geocoding API key not configured; skipping lookup");
            return None;
        };

        let payload = match self.lookup(key, city, address).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(address, error = %err, "geocoding request failed");
                return None;
            }
        };

        debug!(address, status = %payload.status, count = %payload.count, "geocode lookup");

        if payload.status != "1" {
            warn!(address, status = %payload.status, info = %payload.info, "geocoding returned non-success status");
            return None;
        }

        let first = payload.geocodes.into_iter().next()?;
        let location = parse_location(&first.location)?;

        Some(GeocodeResult {
            location,
            formatted_address: if first.formatted_address.is_empty() {
                address.to_string()
            } else {
                first.formatted_address
            },
        })
    }
}

/// AMAP encodes a coordinate pair as a single "lng,lat" string.
fn parse_location(raw: &str) -> Option<Coordinates> {
    let (lng, lat) = raw.split_once(',')?;
    Some(Coordinates {
        lng: lng.trim().parse().ok()?,
        lat: lat.trim().parse().ok()?,
    })
}

#[derive(Debug, Deserialize)]
struct AmapGeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    count: String,
    #[serde(default)]
    info: String,
    #[serde(default)]
    geocodes: Vec<AmapGeocode>,
}

#[derive(Debug, Deserialize)]
struct AmapGeocode {
    #[serde(default)]
    location: String,
    #[serde(default)]
    formatted_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lng_lat_pairs() {
        let parsed = parse_location("139.7454,35.6586").unwrap();
        assert_eq!(parsed.lng, 139.7454);
        assert_eq!(parsed.lat, 35.6586);

        let padded = parse_location(" 116.397 , 39.909 ").unwrap();
        assert_eq!(padded.lng, 116.397);
        assert_eq!(padded.lat, 39.909);
    }

    #[test]
    fn rejects_malformed_locations() {
        assert!(parse_location("").is_none());
        assert!(parse_location("139.7454").is_none());
        assert!(parse_location("east,north").is_none());
    }

    #[test]
    fn response_decoding_tolerates_sparse_payloads() {
        let parsed: AmapGeocodeResponse = serde_json::from_str(r#"{"status":"0","info":"DAILY_QUERY_OVER_LIMIT"}"#).unwrap();
        assert_eq!(parsed.status, "0");
        assert!(parsed.geocodes.is_empty());
    }
}
