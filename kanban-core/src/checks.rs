//! Post-action verification against snapshots and the live surface.

use crate::board::Board;
use crate::error::{KanbanError, Result};
use crate::snapshot::{BoardSnapshotBuilder, column_name};
use crate::subtask::{self, SubtaskCounts};
use crate::surface::RenderingSurface;

/// `true` if `board` has a card named exactly `name` in `column`.
///
/// A column missing from the board counts as empty.
pub fn card_in_column(board: &Board, name: &str, column: &str) -> bool {
    board.cards_in(column).iter().any(|card| card.name == name)
}

pub fn card_not_in_column(board: &Board, name: &str, column: &str) -> bool {
    !card_in_column(board, name, column)
}

/// Checks that read the surface live rather than from a stored [`Board`].
pub struct ReconciliationChecks<'a, S: RenderingSurface + ?Sized> {
    surface: &'a S,
}

impl<'a, S: RenderingSurface + ?Sized> ReconciliationChecks<'a, S> {
    pub fn new(surface: &'a S) -> Self {
        Self { surface }
    }

    /// No card titled `name` is rendered anywhere.
    pub async fn card_absent(&self, name: &str) -> Result<bool> {
        Ok(self.surface.find_card(name).await?.is_none())
    }

    /// Number of cards currently shown in `column`.
    pub async fn column_card_count(&self, column: &str) -> Result<usize> {
        self.surface
            .list_columns()
            .await?
            .into_iter()
            .find(|header| column_name(&header.header_text) == column)
            .map(|header| header.card_count)
            .ok_or_else(|| KanbanError::not_found("column", column))
    }

    /// Every checked subtask on screen must carry the strike-through styling.
    pub async fn subtasks_struck_through(&self) -> Result<()> {
        let unmarked: Vec<String> = self
            .surface
            .visible_subtask_rows()
            .await?
            .into_iter()
            .filter(|row| row.checked && !row.struck_through)
            .map(|row| row.title)
            .collect();

        if unmarked.is_empty() {
            return Ok(());
        }
        tracing::warn!(?unmarked, "checked subtasks without strike-through");
        Err(KanbanError::check_failed(
            "subtasks_struck_through",
            format!("not struck through: {}", unmarked.join(", ")),
        ))
    }

    /// Re-read and parse the progress label of `card_name`.
    pub async fn subtasks_info(&self, card_name: &str) -> Result<SubtaskCounts> {
        let label = self.surface.read_subtask_label_near(card_name).await?;
        subtask::parse(&label).counts(card_name)
    }

    /// Build a fresh board and test membership on it.
    pub async fn verify_card_in_column(&self, name: &str, column: &str) -> Result<bool> {
        let board = BoardSnapshotBuilder::new(self.surface).build().await?;
        Ok(card_in_column(&board, name, column))
    }

    pub async fn expect_card_absent(&self, name: &str) -> Result<()> {
        if self.card_absent(name).await? {
            Ok(())
        } else {
            Err(KanbanError::check_failed(
                "card_absent",
                format!("card '{}' is still rendered", name),
            ))
        }
    }

    pub async fn expect_count(&self, column: &str, expected: usize) -> Result<()> {
        let actual = self.column_card_count(column).await?;
        if actual == expected {
            Ok(())
        } else {
            Err(KanbanError::check_failed(
                "column_card_count",
                format!("column '{}' has {} cards, expected {}", column, actual, expected),
            ))
        }
    }
}

pub fn expect_card_in_column(board: &Board, name: &str, column: &str) -> Result<()> {
    if card_in_column(board, name, column) {
        Ok(())
    } else {
        Err(KanbanError::check_failed(
            "card_in_column",
            format!("card '{}' is not in column '{}'", name, column),
        ))
    }
}

pub fn expect_card_not_in_column(board: &Board, name: &str, column: &str) -> Result<()> {
    if card_not_in_column(board, name, column) {
        Ok(())
    } else {
        Err(KanbanError::check_failed(
            "card_not_in_column",
            format!("card '{}' is still in column '{}'", name, column),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions;
    use crate::inmemory::InMemorySurface;

    #[tokio::test]
    async fn test_membership_on_snapshot() {
        let surface = InMemorySurface::sample();
        let board = BoardSnapshotBuilder::new(&surface).build().await.unwrap();

        assert!(card_in_column(&board, "Research pricing points", "DOING"));
        assert!(card_not_in_column(&board, "Research pricing points", "TODO"));
        assert!(card_not_in_column(&board, "Research pricing points", "ARCHIVE"));
        assert!(!card_in_column(&board, "research pricing points", "DOING"));
        assert!(expect_card_in_column(&board, "Research pricing points", "TODO").is_err());
        assert!(expect_card_not_in_column(&board, "Research pricing points", "TODO").is_ok());
    }

    #[tokio::test]
    async fn test_column_card_count_is_live() {
        let surface = InMemorySurface::sample();
        let checks = ReconciliationChecks::new(&surface);
        assert_eq!(checks.column_card_count("DONE").await.unwrap(), 2);

        let card = "Conduct 5 wireframe tests";
        actions::open_card(&surface, card).await.unwrap();
        actions::delete_card(&surface, card).await.unwrap();

        assert_eq!(checks.column_card_count("DONE").await.unwrap(), 1);
        assert!(checks.card_absent(card).await.unwrap());
        checks.expect_count("DONE", 1).await.unwrap();
        checks.expect_card_absent(card).await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_column_count() {
        let surface = InMemorySurface::sample();
        let checks = ReconciliationChecks::new(&surface);
        let err = checks.column_card_count("ARCHIVE").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_struck_through_passes_when_rendered() {
        let surface = InMemorySurface::sample();
        let card = "Add account management endpoints";
        actions::open_card(&surface, card).await.unwrap();
        actions::check_all_subtasks(&surface, card).await.unwrap();
        ReconciliationChecks::new(&surface).subtasks_struck_through().await.unwrap();
    }

    #[tokio::test]
    async fn test_struck_through_detects_missing_marker() {
        let surface = InMemorySurface::builder()
            .strike_completed(false)
            .column("TODO", |c| c.card("Plan", &[true, false]))
            .build();
        actions::open_card(&surface, "Plan").await.unwrap();

        let err = ReconciliationChecks::new(&surface).subtasks_struck_through().await.unwrap_err();
        match err {
            KanbanError::CheckFailed { check, detail } => {
                assert_eq!(check, "subtasks_struck_through");
                assert!(detail.contains("Subtask 1"));
                assert!(!detail.contains("Subtask 2"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_subtasks_info_rereads_live() {
        let surface = InMemorySurface::sample();
        let checks = ReconciliationChecks::new(&surface);
        let card = "Design settings and search pages";
        actions::open_card(&surface, card).await.unwrap();

        let before = checks.subtasks_info(card).await.unwrap();
        actions::check_all_subtasks(&surface, card).await.unwrap();
        let after = checks.subtasks_info(card).await.unwrap();

        assert_eq!(before, SubtaskCounts { completed: 1, total: 3 });
        assert_eq!(after, SubtaskCounts { completed: 3, total: 3 });
    }

    #[tokio::test]
    async fn test_subtasks_info_unparsable() {
        let surface = InMemorySurface::builder()
            .column("TODO", |c| c.card_with_label("Odd", "Subtasks (none)"))
            .build();
        actions::open_card(&surface, "Odd").await.unwrap();
        let err = ReconciliationChecks::new(&surface).subtasks_info("Odd").await.unwrap_err();
        assert!(matches!(err, KanbanError::Unparsable { card, .. } if card == "Odd"));
    }

    #[tokio::test]
    async fn test_verify_card_in_column_builds_fresh_board() {
        let surface = InMemorySurface::sample();
        let checks = ReconciliationChecks::new(&surface);
        let card = "Research pricing points";
        assert!(checks.verify_card_in_column(card, "DOING").await.unwrap());

        actions::open_card(&surface, card).await.unwrap();
        actions::move_to_first_status(&surface).await.unwrap();

        assert!(checks.verify_card_in_column(card, "TODO").await.unwrap());
        assert!(!checks.verify_card_in_column(card, "DOING").await.unwrap());
    }
}
