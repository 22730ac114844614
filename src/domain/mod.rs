pub mod geocode;
pub mod trip;
