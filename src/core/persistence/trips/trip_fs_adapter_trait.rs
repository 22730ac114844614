use anyhow::Result;
use uuid::Uuid;

use super::trip_entity::TripEntity;

/// Storage adapter seam for trip documents, keyed by trip id.
pub trait TripFsAdapterTrait: Send + Sync {
    fn read(&self, id: Uuid) -> Result<Option<TripEntity>>;

    fn write(&self, data: &TripEntity) -> Result<()>;

    fn delete(&self, id: Uuid) -> Result<()>;

    fn list(&self) -> Result<Vec<TripEntity>>;
}
