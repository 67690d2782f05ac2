//! Per-hunt completion state and its durable store.

pub mod record;
pub mod store;

pub use record::{ProgressRecord, ProgressSummary};
pub use store::ProgressStore;
