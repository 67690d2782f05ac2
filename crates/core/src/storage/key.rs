//! Structured storage keys.
//!
//! Keys are only turned into strings at the storage boundary. The string forms
//! (`hunt_progress_<id>`, `selectedHunt`, `mapRevealEnabled`) match what the
//! web client wrote to `localStorage`, so existing progress carries over.

use std::fmt;

use strum::IntoEnumIterator;

use crate::identifiers::HuntIdentifier;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumIter, strum::Display,
)]
pub enum KeyPurpose {
    #[strum(serialize = "hunt_progress")]
    HuntProgress,
    #[strum(serialize = "selectedHunt")]
    SelectedHunt,
    #[strum(serialize = "mapRevealEnabled")]
    MapRevealEnabled,
}

impl KeyPurpose {
    /// Whether keys of this purpose carry a hunt id.
    pub fn is_hunt_scoped(self) -> bool {
        matches!(self, Self::HuntProgress)
    }

    /// Prefix shared by every key of this purpose.
    pub fn namespace(self) -> String {
        if self.is_hunt_scoped() {
            format!("{}_", self.as_ref())
        } else {
            self.as_ref().to_string()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StorageKey {
    purpose: KeyPurpose,
    hunt: Option<HuntIdentifier>,
}

impl StorageKey {
    pub fn hunt_progress(hunt: HuntIdentifier) -> Self {
        Self {
            purpose: KeyPurpose::HuntProgress,
            hunt: Some(hunt),
        }
    }

    pub fn selected_hunt() -> Self {
        Self {
            purpose: KeyPurpose::SelectedHunt,
            hunt: None,
        }
    }

    pub fn map_reveal_enabled() -> Self {
        Self {
            purpose: KeyPurpose::MapRevealEnabled,
            hunt: None,
        }
    }

    pub fn purpose(&self) -> KeyPurpose {
        self.purpose
    }

    pub fn hunt(&self) -> Option<&HuntIdentifier> {
        self.hunt.as_ref()
    }

    /// Recover a structured key from its storage string.
    pub fn parse(raw: &str) -> Option<Self> {
        KeyPurpose::iter().find_map(|purpose| {
            let namespace = purpose.namespace();
            if purpose.is_hunt_scoped() {
                raw.strip_prefix(namespace.as_str())
                    .filter(|id| !id.is_empty())
                    .map(|id| Self {
                        purpose,
                        hunt: Some(HuntIdentifier::new(id)),
                    })
            } else {
                (raw == namespace).then_some(Self {
                    purpose,
                    hunt: None,
                })
            }
        })
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hunt {
            Some(hunt) => write!(f, "{}{}", self.purpose.namespace(), hunt),
            None => write!(f, "{}", self.purpose.namespace()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_strings() {
        let key = StorageKey::hunt_progress(HuntIdentifier::new("hunt1"));
        assert_eq!(key.to_string(), "hunt_progress_hunt1");
        assert_eq!(StorageKey::selected_hunt().to_string(), "selectedHunt");
        assert_eq!(StorageKey::map_reveal_enabled().to_string(), "mapRevealEnabled");
        assert_eq!(KeyPurpose::HuntProgress.namespace(), "hunt_progress_");
    }

    #[test]
    fn test_parse() {
        let key = StorageKey::parse("hunt_progress_sample1").unwrap();
        assert_eq!(key.purpose(), KeyPurpose::HuntProgress);
        assert_eq!(key.hunt().map(|h| h.as_str()), Some("sample1"));

        // Hunt ids may themselves contain underscores.
        let key = StorageKey::parse("hunt_progress_old_town").unwrap();
        assert_eq!(key.hunt().map(|h| h.as_str()), Some("old_town"));

        assert_eq!(
            StorageKey::parse("mapRevealEnabled"),
            Some(StorageKey::map_reveal_enabled())
        );
        assert_eq!(StorageKey::parse("hunt_progress_"), None);
        assert_eq!(StorageKey::parse("selectedHuntX"), None);
        assert_eq!(StorageKey::parse("something_else"), None);
    }
}
