//! Hunts and clues.
//!
//! `HuntPayload` mirrors the JSON document a hunt author produces. `Hunt` is
//! the validated, immutable value the rest of the engine works with.

use serde::{Deserialize, Serialize};

use crate::identifiers::HuntIdentifier;
use crate::models::coordinate::Coordinate;
use crate::models::types::{HuntError, Result};

// ============================================================================
// Wire format
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HuntPayload {
    #[serde(rename = "scavengerHuntTitle")]
    pub title: String,

    #[serde(rename = "scavengerHuntDescription")]
    pub description: String,

    #[serde(
        rename = "scavengerHuntImage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,

    #[serde(
        rename = "scavengerHuntMinimumAccuracy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub minimum_accuracy: Option<f64>,

    #[serde(default)]
    pub clues: Vec<CluePayload>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CluePayload {
    pub clue_title: String,
    pub clue_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue_picture: Option<String>,

    // Missing coordinates are tolerated here and rejected when a check is attempted.
    #[serde(default)]
    pub answer_latitude: Option<f64>,
    #[serde(default)]
    pub answer_longitude: Option<f64>,

    pub answer_title: String,
    pub answer_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_picture: Option<String>,
}

impl HuntPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| HuntError::MalformedHuntData(e.to_string()))
    }
}

// ============================================================================
// Domain values
// ============================================================================

/// One checkpoint. Its ordinal inside the hunt is its identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Clue {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub answer_title: String,
    pub answer_description: String,
    pub answer_image: Option<String>,
    pub target: Option<Coordinate>,
}

impl Clue {
    /// The target coordinate, if it can be checked against.
    pub fn checkable_target(&self) -> Result<Coordinate> {
        match self.target {
            Some(target) if target.is_finite() => Ok(target),
            Some(target) => Err(HuntError::MalformedHuntData(format!(
                "clue \"{}\" has a non-finite target ({}, {})",
                self.title,
                target.latitude(),
                target.longitude()
            ))),
            None => Err(HuntError::MalformedHuntData(format!(
                "clue \"{}\" has no answer coordinates",
                self.title
            ))),
        }
    }
}

impl From<CluePayload> for Clue {
    fn from(payload: CluePayload) -> Self {
        let target = match (payload.answer_latitude, payload.answer_longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        };

        Self {
            title: payload.clue_title,
            description: payload.clue_description,
            image: non_blank(payload.clue_picture),
            answer_title: payload.answer_title,
            answer_description: payload.answer_description,
            answer_image: non_blank(payload.answer_picture),
            target,
        }
    }
}

/// A loaded hunt. Never mutated after loading; authoring produces a new value.
#[derive(Clone, Debug, PartialEq)]
pub struct Hunt {
    pub id: HuntIdentifier,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// As configured; see [`crate::proximity::ProximityJudge`] for the default.
    pub minimum_accuracy: Option<f64>,
    pub clues: Vec<Clue>,
}

impl Hunt {
    pub fn from_payload(id: HuntIdentifier, payload: HuntPayload) -> Self {
        Self {
            id,
            title: payload.title,
            description: payload.description,
            image: non_blank(payload.image),
            minimum_accuracy: payload.minimum_accuracy,
            clues: payload.clues.into_iter().map(Clue::from).collect(),
        }
    }

    pub fn from_json(id: HuntIdentifier, json: &str) -> Result<Self> {
        Ok(Self::from_payload(id, HuntPayload::from_json(json)?))
    }

    pub fn clue(&self, index: usize) -> Result<&Clue> {
        self.clues.get(index).ok_or_else(|| HuntError::ClueOutOfRange {
            hunt: self.id.clone(),
            index,
            count: self.clues.len(),
        })
    }

    pub fn clue_count(&self) -> usize {
        self.clues.len()
    }

    /// A hunt needs at least one clue to be played.
    pub fn is_playable(&self) -> bool {
        !self.clues.is_empty()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BELLEVUE: &str = r#"{
        "scavengerHuntTitle": "Bellevue Park Hunt",
        "scavengerHuntDescription": "Explore landmarks in the city's biggest park.",
        "scavengerHuntImage": "",
        "scavengerHuntMinimumAccuracy": 15,
        "clues": [
            {
                "clueTitle": "By the River",
                "clueDescription": "A land bridge enjoyed by dog walkers.",
                "cluePicture": "images/clue1.jpg",
                "answerLatitude": 46.0123456,
                "answerLongitude": -84.7894324,
                "answerTitle": "Bridge to Topsail Island",
                "answerDescription": "Enjoy a loop around Topsail Island."
            },
            {
                "clueTitle": "The Old Oak",
                "clueDescription": "A centuries-old tree.",
                "answerLatitude": null,
                "answerTitle": "Heritage Oak Tree",
                "answerDescription": "This magnificent oak has stood here for over 200 years.",
                "answerPicture": ""
            }
        ]
    }"#;

    #[test]
    fn test_parse_payload() {
        let hunt = Hunt::from_json(HuntIdentifier::new("hunt1"), BELLEVUE).unwrap();

        assert_eq!(hunt.title, "Bellevue Park Hunt");
        assert_eq!(hunt.image, None); // blank image is treated as absent
        assert_eq!(hunt.minimum_accuracy, Some(15.0));
        assert_eq!(hunt.clue_count(), 2);
        assert!(hunt.is_playable());

        let first = hunt.clue(0).unwrap();
        assert_eq!(first.image.as_deref(), Some("images/clue1.jpg"));
        assert_eq!(first.answer_image, None);
        assert_eq!(
            first.checkable_target().unwrap(),
            Coordinate::new(46.0123456, -84.7894324)
        );
    }

    #[test]
    fn test_missing_coordinates_rejected_at_check() {
        let hunt = Hunt::from_json(HuntIdentifier::new("hunt1"), BELLEVUE).unwrap();
        let second = hunt.clue(1).unwrap();

        assert_eq!(second.target, None);
        assert!(matches!(
            second.checkable_target(),
            Err(HuntError::MalformedHuntData(_))
        ));
    }

    #[test]
    fn test_non_finite_target_rejected() {
        let clue = Clue {
            title: "Nowhere".into(),
            description: String::new(),
            image: None,
            answer_title: String::new(),
            answer_description: String::new(),
            answer_image: None,
            target: Some(Coordinate::new(f64::NAN, 10.0)),
        };
        assert!(clue.checkable_target().is_err());
    }

    #[test]
    fn test_clue_out_of_range() {
        let hunt = Hunt::from_json(HuntIdentifier::new("hunt1"), BELLEVUE).unwrap();
        assert!(matches!(
            hunt.clue(2),
            Err(HuntError::ClueOutOfRange { index: 2, count: 2, .. })
        ));
    }

    #[test]
    fn test_undecodable_payload() {
        let err = Hunt::from_json(HuntIdentifier::new("broken"), "{ \"clues\": [] }").unwrap_err();
        assert!(matches!(err, HuntError::MalformedHuntData(_)));
    }
}
