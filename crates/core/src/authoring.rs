//! Checks and file naming for hunts written by hand or by an authoring tool.

use std::fmt;

use crate::models::{CluePayload, HuntPayload, Result};

/// A problem that keeps a hunt from being published.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingTitle,
    MissingDescription,
    NoClues,
    /// `clue` is 1-based, as shown to authors.
    Clue { clue: usize, problem: ClueProblem },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClueProblem {
    MissingTitle,
    MissingDescription,
    MissingAnswerTitle,
    MissingAnswerDescription,
    InvalidCoordinates,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "Hunt title is required"),
            Self::MissingDescription => write!(f, "Hunt description is required"),
            Self::NoClues => write!(f, "At least one clue is required"),
            Self::Clue { clue, problem } => write!(f, "Clue {}: {}", clue, problem),
        }
    }
}

impl fmt::Display for ClueProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingTitle => "Title is required",
            Self::MissingDescription => "Description is required",
            Self::MissingAnswerTitle => "Answer title is required",
            Self::MissingAnswerDescription => "Answer description is required",
            Self::InvalidCoordinates => "Valid coordinates are required",
        };
        f.write_str(text)
    }
}

/// Every issue with the hunt, in document order. Empty means publishable.
pub fn validate(hunt: &HuntPayload) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if is_blank(&hunt.title) {
        issues.push(ValidationIssue::MissingTitle);
    }
    if is_blank(&hunt.description) {
        issues.push(ValidationIssue::MissingDescription);
    }
    if hunt.clues.is_empty() {
        issues.push(ValidationIssue::NoClues);
    }

    for (index, clue) in hunt.clues.iter().enumerate() {
        issues.extend(clue_problems(clue).map(|problem| ValidationIssue::Clue {
            clue: index + 1,
            problem,
        }));
    }

    issues
}

fn clue_problems(clue: &CluePayload) -> impl Iterator<Item = ClueProblem> {
    let coordinates_valid = matches!(
        (clue.answer_latitude, clue.answer_longitude),
        (Some(lat), Some(lon)) if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
    );

    [
        (is_blank(&clue.clue_title), ClueProblem::MissingTitle),
        (is_blank(&clue.clue_description), ClueProblem::MissingDescription),
        (is_blank(&clue.answer_title), ClueProblem::MissingAnswerTitle),
        (is_blank(&clue.answer_description), ClueProblem::MissingAnswerDescription),
        (!coordinates_valid, ClueProblem::InvalidCoordinates),
    ]
    .into_iter()
    .filter_map(|(failed, problem)| failed.then_some(problem))
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// File name for a hunt, derived from its title:
/// `"Bellevue Park Hunt!"` -> `"bellevue-park-hunt.json"`.
pub fn file_name(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_matches('-');
    format!("{slug}.json")
}

/// Two-space indented JSON, ready to drop into a hunt directory.
pub fn to_pretty_json(hunt: &HuntPayload) -> Result<String> {
    Ok(serde_json::to_string_pretty(hunt)?)
}
