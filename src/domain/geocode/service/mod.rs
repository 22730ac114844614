//! Batch geocoding: strictly serial, spaced, deduplicated per run.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tracing::debug;

use crate::core::geocode::{GeocodeApi, GeocodeResult};

/// Resolve each distinct address once, in encounter order, inserting
/// `spacing` between upstream requests to stay under the provider's rate
/// limit. Requests are never issued concurrently.
///
/// Addresses that fail to resolve are absent from the returned map; partial
/// success is the normal case, not a batch failure.
pub async fn batch_geocode(
    api: &dyn GeocodeApi,
    city: &str,
    addresses: &[String],
    spacing: Duration,
) -> HashMap<String, GeocodeResult> {
    let mut results: HashMap<String, GeocodeResult> = HashMap::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut issued = 0usize;

    for address in addresses {
        // Duplicate location strings cost exactly one upstream call.
        if !seen.insert(address.as_str()) {
            continue;
        }

        if issued > 0 && !spacing.is_zero() {
            tokio::time::sleep(spacing).await;
        }
        issued += 1;

        if let Some(result) = api.geocode(city, address).await {
            results.insert(address.clone(), result);
        }
    }

    debug!(
        requested = addresses.len(),
        distinct = issued,
        resolved = results.len(),
        "batch geocode complete"
    );
    results
}
