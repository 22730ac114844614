use std::path::PathBuf;

use super::trip_api_repository_trait::TripApiRepository;
use super::trip_fs_adapter::TripFsAdapter;
use super::trip_fs_adapter_trait::TripFsAdapterTrait;

pub struct TripRepository {
    adapter: TripFsAdapter,
}

impl TripRepository {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            adapter: TripFsAdapter::new(data_dir),
        }
    }
}

impl TripApiRepository for TripRepository {
    fn fs_adapter(&self) -> &dyn TripFsAdapterTrait {
        &self.adapter
    }
}
