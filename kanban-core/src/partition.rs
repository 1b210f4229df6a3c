//! Splitting a board by subtask completion.

use crate::board::{Board, Card};
use crate::error::{KanbanError, Result};

/// Completed and incomplete halves of a board.
///
/// Both halves carry every column of the source board, in the same order,
/// even when a half has no cards for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPartition {
    pub completed: Board,
    pub incomplete: Board,
}

/// Split `board` into cards whose subtasks are all done and the rest.
///
/// Card order within each column is preserved. A card with an unparsable
/// progress label cannot be classified and fails the split with
/// [`KanbanError::Unparsable`].
pub fn split(board: &Board) -> Result<BoardPartition> {
    let mut completed = Vec::with_capacity(board.column_count());
    let mut incomplete = Vec::with_capacity(board.column_count());

    for (column, cards) in board.columns() {
        let mut done: Vec<Card> = Vec::new();
        let mut open: Vec<Card> = Vec::new();
        for card in cards {
            match card.subtasks.is_complete() {
                Some(true) => done.push(card.clone()),
                Some(false) => open.push(card.clone()),
                None => {
                    return Err(KanbanError::Unparsable {
                        card: card.name.clone(),
                        raw: card.subtasks.raw.clone(),
                    });
                }
            }
        }
        completed.push((column.to_string(), done));
        incomplete.push((column.to_string(), open));
    }

    Ok(BoardPartition {
        completed: Board::try_from_columns(completed)?,
        incomplete: Board::try_from_columns(incomplete)?,
    })
}
