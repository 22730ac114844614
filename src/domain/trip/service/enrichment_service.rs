//! Attaching resolved coordinates to a generated itinerary.

use std::collections::HashMap;
use std::time::Duration;

use tracing::info;

use crate::core::geocode::{GeocodeApi, GeocodeResult};
use crate::domain::geocode::service::batch_geocode;
use crate::domain::trip::model::Itinerary;

/// Collect every activity location, walking days then activities, keeping
/// duplicates and skipping activities without one. The batch resolver
/// deduplicates against this full list, so upstream call volume is bounded by
/// the number of distinct place strings.
pub fn collect_activity_locations(itinerary: &Itinerary) -> Vec<String> {
    itinerary
        .days
        .iter()
        .flat_map(|day| day.activities.iter())
        .filter_map(|activity| activity.location.clone())
        .filter(|location| !location.trim().is_empty())
        .collect()
}

/// Overwrite-by-key merge: every activity whose location resolved gets that
/// coordinate pair, the rest are left untouched. Applying the same mapping
/// twice yields the same itinerary.
pub fn merge_coordinates(itinerary: &mut Itinerary, resolved: &HashMap<String, GeocodeResult>) {
    for day in &mut itinerary.days {
        for activity in &mut day.activities {
            if let Some(location) = activity.location.as_deref() {
                if let Some(result) = resolved.get(location) {
                    activity.coordinates = Some(result.location);
                }
            }
        }
    }
}

/// Enrich a freshly generated itinerary in place: one batch lookup over all
/// referenced locations, then a merge pass. Unresolved locations leave their
/// activities without coordinates; that is degradation, not failure.
pub async fn enrich_itinerary(
    api: &dyn GeocodeApi,
    city: &str,
    itinerary: &mut Itinerary,
    spacing: Duration,
) {
    let locations = collect_activity_locations(itinerary);
    if locations.is_empty() {
        return;
    }

    let resolved = batch_geocode(api, city, &locations, spacing).await;
    info!(
        locations = locations.len(),
        resolved = resolved.len(),
        "itinerary enrichment complete"
    );
    merge_coordinates(itinerary, &resolved);
}
