//! The rendering surface: whatever shows the live board and accepts clicks.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw header of one column, e.g. `"DOING (3)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHeader {
    pub header_text: String,
    pub card_count: usize,
}

/// Raw text of one card tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardText {
    pub title_text: String,
    pub subtask_label: String,
}

/// One subtask checkbox as rendered inside an open card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskRow {
    pub title: String,
    pub checked: bool,
    /// Whether the row carries the "completed" strike-through styling.
    pub struck_through: bool,
}

/// Where a card was found on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLocation {
    pub column_index: usize,
    pub position: usize,
}

/// User actions the surface can perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "target", rename_all = "snake_case")]
pub enum SurfaceCommand {
    /// Open the detail view of a card.
    OpenCard(String),
    /// Tick the `index`-th subtask checkbox of the open card.
    CheckSubtask { card: String, index: usize },
    OpenStatusSelector,
    /// Pick the first entry of the open status selector.
    ChooseFirstStatus,
    OpenCardMenu(String),
    ChooseEdit,
    ChooseDelete,
    ConfirmDelete,
    CancelDelete,
    /// Submit the edit form.
    Submit,
}

impl SurfaceCommand {
    /// Short action name used in logs and spans.
    pub fn action(&self) -> &'static str {
        match self {
            SurfaceCommand::OpenCard(_) => "open_card",
            SurfaceCommand::CheckSubtask { .. } => "check_subtask",
            SurfaceCommand::OpenStatusSelector => "open_status_selector",
            SurfaceCommand::ChooseFirstStatus => "choose_first_status",
            SurfaceCommand::OpenCardMenu(_) => "open_card_menu",
            SurfaceCommand::ChooseEdit => "choose_edit",
            SurfaceCommand::ChooseDelete => "choose_delete",
            SurfaceCommand::ConfirmDelete => "confirm_delete",
            SurfaceCommand::CancelDelete => "cancel_delete",
            SurfaceCommand::Submit => "submit",
        }
    }
}

impl fmt::Display for SurfaceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceCommand::OpenCard(card) | SurfaceCommand::OpenCardMenu(card) => {
                write!(f, "{} '{}'", self.action(), card)
            }
            SurfaceCommand::CheckSubtask { card, index } => {
                write!(f, "{} #{} of '{}'", self.action(), index, card)
            }
            _ => f.write_str(self.action()),
        }
    }
}

/// Live view of a kanban board.
///
/// Every call reads or acts on the current rendering; implementations must
/// not cache. Missing elements are reported as
/// [`KanbanError::NotFound`](crate::KanbanError::NotFound).
#[async_trait]
pub trait RenderingSurface: Send + Sync {
    /// Column headers in left-to-right order.
    async fn list_columns(&self) -> Result<Vec<ColumnHeader>>;

    /// Cards of the column at `column_index`, top to bottom.
    async fn list_cards(&self, column_index: usize) -> Result<Vec<CardText>>;

    /// Locate a card tile by exact title. `Ok(None)` when no tile matches.
    async fn find_card(&self, name: &str) -> Result<Option<CardLocation>>;

    async fn command(&self, command: SurfaceCommand) -> Result<()>;

    /// Re-read the progress label shown next to `card_name` in its open view.
    async fn read_subtask_label_near(&self, card_name: &str) -> Result<String>;

    /// Subtask checkboxes of the open card `card_name`.
    async fn subtask_rows(&self, card_name: &str) -> Result<Vec<SubtaskRow>>;

    /// Every subtask row currently visible.
    async fn visible_subtask_rows(&self) -> Result<Vec<SubtaskRow>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        assert_eq!(SurfaceCommand::OpenCard("Build".into()).to_string(), "open_card 'Build'");
        assert_eq!(
            SurfaceCommand::CheckSubtask { card: "Build".into(), index: 2 }.to_string(),
            "check_subtask #2 of 'Build'"
        );
        assert_eq!(SurfaceCommand::ConfirmDelete.to_string(), "confirm_delete");
    }

    #[test]
    fn test_command_serialization() {
        let json = serde_json::to_value(SurfaceCommand::OpenCardMenu("Build".into())).unwrap();
        assert_eq!(json, serde_json::json!({"action": "open_card_menu", "target": "Build"}));
    }
}
