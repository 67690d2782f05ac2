//! Distance calculations.

pub mod queries;

pub use queries::{EARTH_RADIUS_METERS, format_distance, haversine_distance};
