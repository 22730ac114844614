pub mod config;
pub mod geocode;
pub mod llm;
pub mod persistence;
