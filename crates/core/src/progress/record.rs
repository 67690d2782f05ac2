use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which clues of one hunt are solved, keyed by clue ordinal.
///
/// Serialized as a JSON object with decimal keys, e.g. `{"0":true,"2":true}`.
/// Missing entries mean "not completed".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord {
    clues: BTreeMap<usize, bool>,
}

impl ProgressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self, clue_index: usize) -> bool {
        self.clues.get(&clue_index).copied().unwrap_or(false)
    }

    /// Returns `true` if the clue was not already completed.
    pub fn mark_complete(&mut self, clue_index: usize) -> bool {
        !std::mem::replace(self.clues.entry(clue_index).or_insert(false), true)
    }

    /// Completed clues among the first `total`. Entries past the end of the
    /// hunt (left over from an older revision of it) are not counted.
    pub fn completed_count(&self, total: usize) -> usize {
        self.clues
            .range(..total)
            .filter(|(_, completed)| **completed)
            .count()
    }

    pub fn summary(&self, total: usize) -> ProgressSummary {
        ProgressSummary {
            completed: self.completed_count(total),
            total,
        }
    }

    /// `false` for a record whose entries are all `false`, e.g. `{"1":false}`.
    pub fn has_completed_clues(&self) -> bool {
        self.clues.values().any(|completed| *completed)
    }

    pub fn completed_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.clues
            .iter()
            .filter(|(_, completed)| **completed)
            .map(|(index, _)| *index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
}

impl ProgressSummary {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }

    /// 0.0 ..= 100.0; an empty hunt reads as 0%.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}
