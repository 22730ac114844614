//! Filesystem layout for persisted data.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Directory holding one JSON document per trip.
pub fn trips_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("trips")
}

pub fn trip_path(data_dir: &Path, id: Uuid) -> PathBuf {
    trips_dir(data_dir).join(format!("{}.json", id))
}
