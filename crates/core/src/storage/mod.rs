//! Durable key-value persistence and the keys the engine stores under.

pub mod key;
pub mod memory;
pub mod settings;
pub mod sqlite;
pub mod traits;

pub use key::{KeyPurpose, StorageKey};
pub use memory::MemoryStore;
pub use settings::UserSettings;
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;
