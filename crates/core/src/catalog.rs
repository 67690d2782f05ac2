//! The set of hunts available to play.
//!
//! Hunts are JSON files in a directory, one hunt per file, identified by the
//! file stem. Files that fail to decode, and hunts without clues, are left out
//! with a warning rather than failing the whole catalog.

use std::path::Path;
use std::sync::Arc;

use crate::identifiers::HuntIdentifier;
use crate::models::{Hunt, HuntError, HuntPayload, Result};
use crate::progress::{ProgressStore, ProgressSummary};

const SAMPLE_HUNTS: [(&str, &str); 2] = [
    ("sample1", include_str!("../assets/sample-hunts/sample1.json")),
    ("sample2", include_str!("../assets/sample-hunts/sample2.json")),
];

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    hunts: Vec<Arc<Hunt>>,
}

/// One row of the hunt list.
#[derive(Clone, Debug, PartialEq)]
pub struct HuntListing {
    pub id: HuntIdentifier,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub progress: ProgressSummary,
}

impl Catalog {
    /// Hunts are kept in id order.
    pub fn from_hunts(hunts: impl IntoIterator<Item = Hunt>) -> Self {
        let mut hunts: Vec<Arc<Hunt>> = hunts.into_iter().map(Arc::new).collect();
        hunts.sort_by(|a, b| a.id.cmp(&b.id));
        Self { hunts }
    }

    /// The built-in sample hunts.
    pub fn samples() -> Self {
        Self::from_hunts(SAMPLE_HUNTS.iter().filter_map(|(id, json)| {
            Hunt::from_json(HuntIdentifier::new(id), json)
                .inspect_err(|e| tracing::warn!(hunt = id, error = %e, "bad built-in sample hunt"))
                .ok()
        }))
    }

    /// Load every `*.json` file in `dir`. Falls back to the sample hunts when
    /// the directory is missing, unreadable, or yields no playable hunt.
    pub fn load_dir(dir: &Path) -> Self {
        match Self::read_dir(dir) {
            Ok(catalog) if !catalog.is_empty() => {
                tracing::info!(dir = %dir.display(), hunts = catalog.len(), "loaded hunt catalog");
                catalog
            }
            Ok(_) => {
                tracing::info!(dir = %dir.display(), "no hunts found, using sample hunts");
                Self::samples()
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "could not read hunt directory, using sample hunts");
                Self::samples()
            }
        }
    }

    /// Like [`load_dir`](Self::load_dir) without the fallback. Only a failure
    /// to list the directory is an error.
    pub fn read_dir(dir: &Path) -> Result<Self> {
        let mut hunts = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            match read_hunt(&path) {
                Ok(hunt) if hunt.is_playable() => hunts.push(hunt),
                Ok(hunt) => {
                    tracing::warn!(hunt = %hunt.id, "skipping hunt without clues");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable hunt");
                }
            }
        }

        Ok(Self::from_hunts(hunts))
    }

    pub fn hunts(&self) -> &[Arc<Hunt>] {
        &self.hunts
    }

    pub fn get(&self, id: &HuntIdentifier) -> Result<Arc<Hunt>> {
        self.hunts
            .iter()
            .find(|hunt| &hunt.id == id)
            .cloned()
            .ok_or_else(|| HuntError::HuntNotFound(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.hunts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hunts.is_empty()
    }

    /// Every hunt with its stored progress.
    pub async fn listings(&self, store: &ProgressStore) -> Result<Vec<HuntListing>> {
        let mut listings = Vec::with_capacity(self.hunts.len());

        for hunt in &self.hunts {
            listings.push(HuntListing {
                id: hunt.id.clone(),
                title: hunt.title.clone(),
                description: hunt.description.clone(),
                image: hunt.image.clone(),
                progress: store.summary(hunt).await?,
            });
        }

        Ok(listings)
    }
}

/// Read a single hunt file; its id is the file stem.
pub fn read_hunt(path: &Path) -> Result<Hunt> {
    let id = HuntIdentifier::from_file_stem(path).ok_or_else(|| {
        HuntError::MalformedHuntData(format!("{} has no usable file name", path.display()))
    })?;
    let json = std::fs::read_to_string(path)?;

    let payload: HuntPayload = serde_json::from_str(&json)
        .map_err(|e| HuntError::MalformedHuntData(format!("{}: {}", path.display(), e)))?;

    Ok(Hunt::from_payload(id, payload))
}
