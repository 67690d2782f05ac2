//! User-level values that live next to hunt progress: the map-reveal flag and
//! the hunt handed from the catalog view to the hunt view.

use std::sync::Arc;

use crate::identifiers::HuntIdentifier;
use crate::models::Result;
use crate::storage::key::StorageKey;
use crate::storage::traits::KeyValueStore;

#[derive(Clone)]
pub struct UserSettings {
    backend: Arc<dyn KeyValueStore>,
}

impl UserSettings {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Off unless explicitly stored as `"true"`.
    pub async fn map_reveal_enabled(&self) -> Result<bool> {
        let key = StorageKey::map_reveal_enabled().to_string();
        let enabled = match self.backend.get(&key).await?.as_deref() {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => {
                tracing::warn!(value = other, "ignoring unrecognised map reveal setting");
                false
            }
        };
        Ok(enabled)
    }

    pub async fn set_map_reveal_enabled(&self, enabled: bool) -> Result<()> {
        let key = StorageKey::map_reveal_enabled().to_string();
        self.backend
            .set(&key, if enabled { "true" } else { "false" })
            .await
    }

    pub async fn select_hunt(&self, hunt: &HuntIdentifier) -> Result<()> {
        let key = StorageKey::selected_hunt().to_string();
        self.backend.set(&key, hunt.as_str()).await
    }

    pub async fn selected_hunt(&self) -> Result<Option<HuntIdentifier>> {
        let key = StorageKey::selected_hunt().to_string();
        Ok(self
            .backend
            .get(&key)
            .await?
            .filter(|id| !id.is_empty())
            .map(HuntIdentifier::from))
    }

    pub async fn clear_selected_hunt(&self) -> Result<()> {
        let key = StorageKey::selected_hunt().to_string();
        self.backend.delete(&key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_map_reveal_flag() {
        let backend = Arc::new(MemoryStore::new());
        let settings = UserSettings::new(backend.clone());

        assert!(!settings.map_reveal_enabled().await.unwrap());
        settings.set_map_reveal_enabled(true).await.unwrap();
        assert!(settings.map_reveal_enabled().await.unwrap());
        assert_eq!(
            backend.get("mapRevealEnabled").await.unwrap().as_deref(),
            Some("true")
        );

        backend.set("mapRevealEnabled", "yes please").await.unwrap();
        assert!(!settings.map_reveal_enabled().await.unwrap());
    }

    #[tokio::test]
    async fn test_selected_hunt_handoff() {
        let settings = UserSettings::new(Arc::new(MemoryStore::new()));

        assert_eq!(settings.selected_hunt().await.unwrap(), None);
        settings.select_hunt(&HuntIdentifier::new("hunt2")).await.unwrap();
        assert_eq!(
            settings.selected_hunt().await.unwrap(),
            Some(HuntIdentifier::new("hunt2"))
        );

        settings.clear_selected_hunt().await.unwrap();
        assert_eq!(settings.selected_hunt().await.unwrap(), None);
    }
}
