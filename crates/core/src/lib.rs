//! # scavenger-hunt-core
//!
//! Proximity checks and durable progress for location-based scavenger hunts.
//!
//! ## Features
//!
//! - **Proximity judging**: great-circle distance against a threshold that
//!   grows with the device's reported accuracy
//! - **Durable progress**: one record per hunt, written before a clue is
//!   reported solved
//! - **Hunt sessions**: reveal sequencing, one location check at a time,
//!   completion announced exactly once
//! - **Pluggable backends**: bring your own key-value store and position source
//!
//! ## Example
//!
//! ```
//! use scavenger_hunt_core::prelude::*;
//!
//! let target = Coordinate::new(46.0123456, -84.7894324);
//! let reading = ReportedPosition::new(46.0123456, -84.7894324, 5.0);
//!
//! let verdict = ProximityJudge::default()
//!     .evaluate(&reading, target, Some(15.0))
//!     .unwrap();
//! assert!(verdict.passed);
//! assert_eq!(verdict.threshold_meters, 20.0);
//! ```

pub mod authoring;
pub mod catalog;
pub mod config;
pub mod identifiers;
pub mod location;
pub mod models;
pub mod progress;
pub mod proximity;
pub mod session;
pub mod spatial;
pub mod storage;

// Re-exports for convenience
pub mod prelude {
    pub use crate::catalog::{Catalog, HuntListing};
    pub use crate::config::EngineConfig;
    pub use crate::identifiers::*;
    pub use crate::location::{LocationError, LocationOptions, PositionSource};
    pub use crate::models::{
        Clue, CluePayload, Coordinate, Hunt, HuntError, HuntPayload, ReportedPosition, Result,
    };
    pub use crate::progress::{ProgressRecord, ProgressStore, ProgressSummary};
    pub use crate::proximity::{ProximityJudge, Verdict};
    pub use crate::session::{CheckOutcome, ClueState, HuntSession, SessionError};
    pub use crate::spatial::{format_distance, haversine_distance};
    pub use crate::storage::{KeyValueStore, MemoryStore, SqliteStore, UserSettings};
}

pub use prelude::*;
