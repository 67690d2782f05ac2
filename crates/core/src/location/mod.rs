//! Position source abstraction.

pub mod fixed;
pub mod traits;

pub use fixed::{FixedPositionSource, UnsupportedPositionSource};
pub use traits::{LocationError, LocationOptions, PositionSource, request_position};
