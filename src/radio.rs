pub mod params;
pub mod profile;
