pub mod trip_api_repository_trait;
pub mod trip_entity;
pub mod trip_fs_adapter;
pub mod trip_fs_adapter_trait;
pub mod trip_repository;
