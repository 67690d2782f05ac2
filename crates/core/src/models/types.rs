//! Error type shared by the engine.

use crate::identifiers::HuntIdentifier;

#[derive(Debug, thiserror::Error)]
pub enum HuntError {
    #[error("Stored progress for hunt {hunt} is corrupt: {reason}")]
    StorageCorrupt { hunt: HuntIdentifier, reason: String },

    #[error("Malformed hunt data: {0}")]
    MalformedHuntData(String),

    #[error("Invalid position reading: {0}")]
    InvalidPosition(String),

    #[error("Clue {index} does not exist in hunt {hunt} ({count} clues)")]
    ClueOutOfRange {
        hunt: HuntIdentifier,
        index: usize,
        count: usize,
    },

    #[error("Hunt not found: {0}")]
    HuntNotFound(HuntIdentifier),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HuntError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HuntError::ClueOutOfRange {
            hunt: HuntIdentifier::new("sample1"),
            index: 4,
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "Clue 4 does not exist in hunt sample1 (2 clues)"
        );

        let err = HuntError::StorageCorrupt {
            hunt: HuntIdentifier::new("sample1"),
            reason: "expected value".into(),
        };
        assert!(err.to_string().starts_with("Stored progress for hunt sample1"));
    }
}
