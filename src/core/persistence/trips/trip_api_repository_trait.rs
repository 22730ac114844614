use anyhow::Result;
use uuid::Uuid;

use super::trip_entity::TripEntity;
use super::trip_fs_adapter_trait::TripFsAdapterTrait;

/// API-facing repository abstraction for trips.
pub trait TripApiRepository: Send + Sync {
    fn fs_adapter(&self) -> &dyn TripFsAdapterTrait;

    fn read(&self, id: Uuid) -> Result<Option<TripEntity>> {
        self.fs_adapter().read(id)
    }

    fn write(&self, trip: &TripEntity) -> Result<()> {
        self.fs_adapter().write(trip)
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        self.fs_adapter().delete(id)
    }

    fn list(&self) -> Result<Vec<TripEntity>> {
        self.fs_adapter().list()
    }
}
