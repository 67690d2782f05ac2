//! Durable progress, one JSON record per hunt.
//!
//! The store is the source of truth on load. Every mutation is written before
//! the call returns, so a crash right after a successful check never loses it.

use std::sync::Arc;

use crate::identifiers::HuntIdentifier;
use crate::models::{Hunt, HuntError, Result};
use crate::progress::record::{ProgressRecord, ProgressSummary};
use crate::storage::key::{KeyPurpose, StorageKey};
use crate::storage::traits::KeyValueStore;

#[derive(Clone)]
pub struct ProgressStore {
    backend: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Empty record when nothing is stored; `StorageCorrupt` when something is
    /// stored but cannot be decoded.
    pub async fn load(&self, hunt: &HuntIdentifier) -> Result<ProgressRecord> {
        let key = StorageKey::hunt_progress(hunt.clone()).to_string();

        match self.backend.get(&key).await? {
            None => Ok(ProgressRecord::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| HuntError::StorageCorrupt {
                hunt: hunt.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Like [`load`](Self::load), but a corrupt record reads as empty.
    pub async fn load_or_default(&self, hunt: &HuntIdentifier) -> Result<ProgressRecord> {
        match self.load(hunt).await {
            Err(HuntError::StorageCorrupt { hunt, reason }) => {
                tracing::warn!(%hunt, %reason, "discarding corrupt progress record");
                Ok(ProgressRecord::new())
            }
            other => other,
        }
    }

    /// Idempotent. Returns the record as stored after the call.
    pub async fn mark_complete(&self, hunt: &HuntIdentifier, clue_index: usize) -> Result<ProgressRecord> {
        let mut record = self.load_or_default(hunt).await?;

        if record.mark_complete(clue_index) {
            self.save(hunt, &record).await?;
            tracing::info!(%hunt, clue = clue_index, "clue completed");
        } else {
            tracing::debug!(%hunt, clue = clue_index, "clue already completed");
        }

        Ok(record)
    }

    pub async fn clear(&self, hunt: &HuntIdentifier) -> Result<()> {
        let key = StorageKey::hunt_progress(hunt.clone()).to_string();
        self.backend.delete(&key).await?;
        tracing::info!(%hunt, "cleared hunt progress");
        Ok(())
    }

    /// Removes the progress of every hunt the backend knows about, including
    /// hunts no longer in the catalog. Returns how many records were removed.
    pub async fn clear_all(&self) -> Result<usize> {
        let namespace = KeyPurpose::HuntProgress.namespace();
        let keys = self.backend.list_keys(&namespace).await?;

        let mut removed = 0;
        for key in keys {
            // Only keys that parse back as hunt progress; never settings.
            if StorageKey::parse(&key).is_some_and(|k| k.purpose() == KeyPurpose::HuntProgress) {
                self.backend.delete(&key).await?;
                removed += 1;
            }
        }

        tracing::info!(removed, "cleared progress for all hunts");
        Ok(removed)
    }

    pub async fn summary(&self, hunt: &Hunt) -> Result<ProgressSummary> {
        let record = self.load_or_default(&hunt.id).await?;
        Ok(record.summary(hunt.clue_count()))
    }

    async fn save(&self, hunt: &HuntIdentifier, record: &ProgressRecord) -> Result<()> {
        let key = StorageKey::hunt_progress(hunt.clone()).to_string();
        let value = serde_json::to_string(record)?;
        self.backend.set(&key, &value).await
    }
}
