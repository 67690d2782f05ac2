//! Per-clue states and the values a check produces.

use crate::location::LocationError;
use crate::models::HuntError;
use crate::proximity::Verdict;
use crate::spatial::format_distance;

/// Where the open clue is in its reveal/check sequence.
///
/// `Unopened -> DescriptionHidden -> DescriptionRevealed -> [ImageRevealed] ->
/// [MapRevealed] -> CheckingLocation -> Solved | CheckFailed | CheckError`,
/// with the last two looping back to `CheckingLocation` on retry.
#[derive(Clone, Debug, PartialEq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ClueState {
    Unopened,
    DescriptionHidden,
    DescriptionRevealed,
    ImageRevealed,
    MapRevealed,
    CheckingLocation,
    CheckFailed(Verdict),
    CheckError(LocationError),
    /// `verdict` is `None` when the clue was already solved when opened.
    Solved { verdict: Option<Verdict> },
}

impl ClueState {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }

    pub fn is_checking(&self) -> bool {
        matches!(self, Self::CheckingLocation)
    }

    /// A check may start once the description is showing, and again after any
    /// failed attempt.
    pub fn can_check(&self) -> bool {
        matches!(
            self,
            Self::DescriptionRevealed
                | Self::ImageRevealed
                | Self::MapRevealed
                | Self::CheckFailed(_)
                | Self::CheckError(_)
        )
    }

    /// States in which more of the clue may still be revealed.
    pub(crate) fn accepts_reveal(&self) -> bool {
        !matches!(
            self,
            Self::Unopened | Self::CheckingLocation | Self::Solved { .. }
        )
    }
}

/// What the player has uncovered so far for the open clue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reveals {
    pub description: bool,
    pub image: bool,
    pub map: bool,
}

/// Result of one location check, as reported to the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum CheckOutcome {
    Solved {
        verdict: Verdict,
        /// Set on exactly one check per session: the one that solved the last clue.
        hunt_completed: bool,
    },
    TooFar(Verdict),
    Failed(LocationError),
}

impl CheckOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Solved { .. } => "Correct location! Well done!".to_string(),
            Self::TooFar(verdict) => format!(
                "Not quite right! You're {} away. Try to get within {} meters.",
                format_distance(verdict.distance_meters),
                verdict.threshold_meters.round()
            ),
            Self::Failed(error) => error.user_message(),
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }

    pub fn hunt_completed(&self) -> bool {
        matches!(self, Self::Solved { hunt_completed: true, .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No clue is open")]
    NoActiveClue,

    #[error("Cannot {action} while the clue is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("A location check is already in progress")]
    CheckInFlight,

    #[error("This clue has no image")]
    NoImage,

    #[error("Map reveal is turned off")]
    MapRevealDisabled,

    #[error("Check ticket does not belong to the open clue")]
    StaleTicket,

    #[error(transparent)]
    Hunt(#[from] HuntError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names() {
        assert_eq!(ClueState::DescriptionHidden.name(), "description_hidden");
        assert_eq!(ClueState::Solved { verdict: None }.name(), "solved");
        assert_eq!(
            ClueState::CheckError(LocationError::Timeout).name(),
            "check_error"
        );
    }

    #[test]
    fn test_can_check() {
        assert!(!ClueState::DescriptionHidden.can_check());
        assert!(ClueState::DescriptionRevealed.can_check());
        assert!(ClueState::CheckError(LocationError::Timeout).can_check());
        assert!(!ClueState::CheckingLocation.can_check());
        assert!(!ClueState::Solved { verdict: None }.can_check());
    }

    #[test]
    fn test_messages() {
        let too_far = CheckOutcome::TooFar(Verdict {
            passed: false,
            distance_meters: 472.23,
            threshold_meters: 20.0,
        });
        assert_eq!(
            too_far.message(),
            "Not quite right! You're 472 meters away. Try to get within 20 meters."
        );

        let far_away = CheckOutcome::TooFar(Verdict {
            passed: false,
            distance_meters: 1586.5,
            threshold_meters: 55.0,
        });
        assert!(far_away.message().contains("1.6 km away"));

        let solved = CheckOutcome::Solved {
            verdict: Verdict {
                passed: true,
                distance_meters: 0.0,
                threshold_meters: 20.0,
            },
            hunt_completed: true,
        };
        assert_eq!(solved.message(), "Correct location! Well done!");
        assert!(solved.hunt_completed());

        let failed = CheckOutcome::Failed(LocationError::PermissionDenied);
        assert_eq!(
            failed.message(),
            "Location access failed. Please allow location access to play."
        );
    }
}
