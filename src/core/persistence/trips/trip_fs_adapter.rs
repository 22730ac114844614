use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;
use uuid::Uuid;

use crate::core::persistence::storage_path::{trip_path, trips_dir};

use super::trip_entity::TripEntity;
use super::trip_fs_adapter_trait::TripFsAdapterTrait;

/// FS adapter storing each trip as a JSON document.
///
/// Writes go through a temp file, fsync and rename so a crash never leaves a
/// half-written trip behind.
pub struct TripFsAdapter {
    data_dir: PathBuf,
}

impl TripFsAdapter {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

impl TripFsAdapterTrait for TripFsAdapter {
    fn read(&self, id: Uuid) -> Result<Option<TripEntity>> {
        let path = trip_path(&self.data_dir, id);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path).context("Failed to open trip file")?;
        let entity = serde_json::from_reader(BufReader::new(file)).context("Failed to parse trip file")?;
        Ok(Some(entity))
    }

    fn write(&self, data: &TripEntity) -> Result<()> {
        let path = trip_path(&self.data_dir, data.id);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create trips directory")?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let file = File::create(&tmp_path).context("Failed to create temp trip file")?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data).context("Failed to serialize trip")?;
        writer.flush()?;
        writer
            .get_ref()
            .sync_all()
            .context("Failed to sync temp trip file")?;
        fs::rename(&tmp_path, &path).context("Failed to finalize trip file")?;

        #[cfg(unix)]
        if let Some(dir) = path.parent() {
            let dir_file = File::open(dir).context("Failed to open trips directory")?;
            dir_file.sync_all().context("Failed to sync trips directory")?;
        }

        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let path = trip_path(&self.data_dir, id);
        if path.exists() {
            fs::remove_file(&path).context("Failed to delete trip file")?;
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<TripEntity>> {
        let dir = trips_dir(&self.data_dir);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut trips: Vec<TripEntity> = Vec::new();
        for entry in fs::read_dir(&dir).context("Failed to read trips directory")? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            match File::open(&path).map(BufReader::new) {
                Ok(reader) => match serde_json::from_reader(reader) {
                    Ok(entity) => trips.push(entity),
                    Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable trip file"),
                },
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unopenable trip file"),
            }
        }

        // Most recently created first.
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trips)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::trip::dto::create_trip_request::CreateTripRequest;

    use super::*;

    fn sample_trip() -> TripEntity {
        TripEntity::from_create(CreateTripRequest {
            title: "Tokyo Trip".into(),
            destination: "Tokyo".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            traveler_count: 2,
            budget_total: Some(5000.0),
            currency: None,
            preferences: None,
        })
    }

    #[test]
    fn write_read_delete_round_trip() {
        let dir = std::env::temp_dir().join(format!("tripflow-test-{}", Uuid::new_v4()));
        let adapter = TripFsAdapter::new(dir.clone());

        let trip = sample_trip();
        adapter.write(&trip).unwrap();

        let loaded = adapter.read(trip.id).unwrap().expect("trip should exist");
        assert_eq!(loaded.id, trip.id);
        assert_eq!(loaded.destination, "Tokyo");
        assert_eq!(loaded.currency, "CNY");
        assert!(loaded.itinerary.is_none());

        adapter.delete(trip.id).unwrap();
        assert!(adapter.read(trip.id).unwrap().is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_trip_reads_as_none() {
        let dir = std::env::temp_dir().join(format!("tripflow-test-{}", Uuid::new_v4()));
        let adapter = TripFsAdapter::new(dir.clone());

        assert!(adapter.read(Uuid::new_v4()).unwrap().is_none());
        assert!(adapter.list().unwrap().is_empty());

        let _ = fs::remove_dir_all(&dir);
    }
}
