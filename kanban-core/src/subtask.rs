//! Subtask progress labels.
//!
//! Cards render their checklist progress as free text such as
//! `"2 of 5 subtasks"` or `"Subtasks (2 of 5)"`. The first two runs of ASCII
//! digits are the completed and total counts; every other token is ignored.

use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};

/// Outcome of parsing a progress label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubtaskProgress {
    Parsed { completed: u32, total: u32 },
    /// The label did not carry two numeric tokens.
    Unparsable,
}

/// Completed/total pair read from a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskCounts {
    pub completed: u32,
    pub total: u32,
}

impl SubtaskCounts {
    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

/// Parsed subtask progress together with the label it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskInfo {
    pub progress: SubtaskProgress,
    /// Trimmed source label, kept for diagnostics.
    pub raw: String,
}

impl SubtaskInfo {
    pub fn completed(&self) -> Option<u32> {
        match self.progress {
            SubtaskProgress::Parsed { completed, .. } => Some(completed),
            SubtaskProgress::Unparsable => None,
        }
    }

    pub fn total(&self) -> Option<u32> {
        match self.progress {
            SubtaskProgress::Parsed { total, .. } => Some(total),
            SubtaskProgress::Unparsable => None,
        }
    }

    /// `Some(true)` when every subtask is done, `None` for unparsable labels.
    pub fn is_complete(&self) -> Option<bool> {
        self.counts_opt().map(|c| c.is_complete())
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self.progress, SubtaskProgress::Parsed { .. })
    }

    /// Counts for `card`, or [`KanbanError::Unparsable`] naming it.
    pub fn counts(&self, card: &str) -> Result<SubtaskCounts> {
        self.counts_opt().ok_or_else(|| KanbanError::Unparsable {
            card: card.to_string(),
            raw: self.raw.clone(),
        })
    }

    fn counts_opt(&self) -> Option<SubtaskCounts> {
        match self.progress {
            SubtaskProgress::Parsed { completed, total } => {
                Some(SubtaskCounts { completed, total })
            }
            SubtaskProgress::Unparsable => None,
        }
    }
}

/// Parse a progress label such as `"2 of 5 subtasks"`.
pub fn parse(label: &str) -> SubtaskInfo {
    let raw = label.trim();
    let mut numbers = raw.split(|c: char| !c.is_ascii_digit()).filter(|token| !token.is_empty());

    let progress = match (numbers.next(), numbers.next()) {
        (Some(completed), Some(total)) => match (completed.parse(), total.parse()) {
            (Ok(completed), Ok(total)) => SubtaskProgress::Parsed { completed, total },
            _ => SubtaskProgress::Unparsable,
        },
        _ => SubtaskProgress::Unparsable,
    };

    SubtaskInfo { progress, raw: raw.to_string() }
}
