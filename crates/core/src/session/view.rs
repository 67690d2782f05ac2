//! Read-only projections of a session for whatever draws it.

use crate::models::Coordinate;
use crate::session::machine::HuntSession;
use crate::session::state::{CheckOutcome, ClueState};

#[derive(Clone, Debug, PartialEq)]
pub struct HuntView<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub image: Option<&'a str>,
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
    pub clues: Vec<ClueSummary<'a>>,
}

impl HuntView<'_> {
    /// e.g. "1/2 completed"
    pub fn progress_text(&self) -> String {
        format!("{}/{} completed", self.completed, self.total)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClueSummary<'a> {
    pub index: usize,
    pub title: &'a str,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnswerView<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub image: Option<&'a str>,
}

/// The open clue as it should currently be shown.
#[derive(Clone, Debug, PartialEq)]
pub struct ClueView<'a> {
    pub index: usize,
    pub title: &'a str,
    pub state: &'a ClueState,
    pub description: Option<&'a str>,
    pub image: Option<&'a str>,
    pub map_target: Option<Coordinate>,
    pub answer: Option<AnswerView<'a>>,
    pub can_reveal_description: bool,
    pub can_reveal_image: bool,
    pub can_reveal_map: bool,
    pub can_check: bool,
    /// Feedback from the last check, if any.
    pub status_message: Option<String>,
}

impl HuntSession {
    pub fn view(&self) -> HuntView<'_> {
        let hunt = self.hunt();
        let summary = self.summary();

        HuntView {
            title: &hunt.title,
            description: &hunt.description,
            image: hunt.image.as_deref(),
            completed: summary.completed,
            total: summary.total,
            percentage: summary.percentage(),
            clues: hunt
                .clues
                .iter()
                .enumerate()
                .map(|(index, clue)| ClueSummary {
                    index,
                    title: &clue.title,
                    completed: self.progress().is_completed(index),
                })
                .collect(),
        }
    }

    /// `None` when no clue is open.
    pub fn clue_view(&self) -> Option<ClueView<'_>> {
        let active = self.active()?;
        let clue = self.hunt().clues.get(active.index)?;
        let state = &active.state;
        let solved = state.is_solved();

        // A solved clue shows everything; otherwise only what has been revealed.
        let description = (solved || active.reveals.description).then_some(clue.description.as_str());
        let image = if solved || active.reveals.image {
            clue.image.as_deref()
        } else {
            None
        };
        let map_target = if active.reveals.map || (solved && self.map_reveal_enabled()) {
            clue.target
        } else {
            None
        };

        let answer = solved.then(|| AnswerView {
            title: &clue.answer_title,
            description: &clue.answer_description,
            image: clue.answer_image.as_deref(),
        });

        let revealing = state.accepts_reveal();
        let image_done = active.reveals.image || clue.image.is_none();

        let status_message = match state {
            ClueState::CheckingLocation => Some("Getting your location...".to_string()),
            ClueState::CheckFailed(verdict) => Some(CheckOutcome::TooFar(*verdict).message()),
            ClueState::CheckError(e) => Some(CheckOutcome::Failed(e.clone()).message()),
            ClueState::Solved {
                verdict: Some(verdict),
            } => Some(
                CheckOutcome::Solved {
                    verdict: *verdict,
                    hunt_completed: false,
                }
                .message(),
            ),
            _ => None,
        };

        Some(ClueView {
            index: active.index,
            title: &clue.title,
            state,
            description,
            image,
            map_target,
            answer,
            can_reveal_description: *state == ClueState::DescriptionHidden,
            can_reveal_image: revealing
                && active.reveals.description
                && !active.reveals.image
                && clue.image.is_some(),
            can_reveal_map: revealing
                && self.map_reveal_enabled()
                && active.reveals.description
                && image_done
                && !active.reveals.map,
            can_check: state.can_check(),
            status_message,
        })
    }
}
