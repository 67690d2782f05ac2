//! Hunt data models, coordinates, and the shared error type.

pub mod coordinate;
pub mod hunt;
pub mod types;

// Re-exports for convenience
pub use coordinate::{Coordinate, ReportedPosition};
pub use hunt::{Clue, CluePayload, Hunt, HuntPayload};
pub use types::{HuntError, Result};
