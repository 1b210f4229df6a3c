//! Pure lookups over a [`Board`].

use crate::board::{Board, ColumnInfo};
use crate::error::{KanbanError, Result};

/// Whether candidate selection may pick the first (head) column.
///
/// The head column is usually the intake lane that scenarios leave alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadColumn {
    #[default]
    Skip,
    Include,
}

impl HeadColumn {
    fn start_index(self) -> usize {
        match self {
            HeadColumn::Skip => 1,
            HeadColumn::Include => 0,
        }
    }
}

/// First column, in display order, that holds at least one card.
pub fn first_non_empty_column(board: &Board, head: HeadColumn) -> Option<ColumnInfo> {
    board
        .columns()
        .skip(head.start_index())
        .find(|(_, cards)| !cards.is_empty())
        .map(|(column, cards)| ColumnInfo::new(column, cards.to_vec()))
}

/// [`first_non_empty_column`] with the head column excluded.
pub fn first_non_empty_column_after_head(board: &Board) -> Option<ColumnInfo> {
    first_non_empty_column(board, HeadColumn::Skip)
}

pub fn first_column_name(board: &Board) -> Result<&str> {
    board.column_at(0).map(|(name, _)| name).ok_or(KanbanError::EmptyBoard)
}
