//! Reading a full [`Board`] off a rendering surface.

use crate::board::{Board, Card};
use crate::error::{KanbanError, Result};
use crate::subtask;
use crate::surface::{CardText, RenderingSurface};

/// Column name shown in a header, without its count badge.
///
/// `"DOING (3)"` becomes `"DOING"`.
pub fn column_name(header_text: &str) -> &str {
    header_text.split('(').next().unwrap_or_default().trim()
}

/// Builds fresh board snapshots from a surface.
pub struct BoardSnapshotBuilder<'a, S: RenderingSurface + ?Sized> {
    surface: &'a S,
}

impl<'a, S: RenderingSurface + ?Sized> BoardSnapshotBuilder<'a, S> {
    pub fn new(surface: &'a S) -> Self {
        Self { surface }
    }

    /// Read every column and card as currently rendered.
    ///
    /// Issues one column listing and one card listing per column. Nothing is
    /// cached between calls.
    pub async fn build(&self) -> Result<Board> {
        let headers = self.surface.list_columns().await?;
        let mut columns = Vec::with_capacity(headers.len());

        for (index, header) in headers.iter().enumerate() {
            let name = column_name(&header.header_text);
            let cards = self
                .surface
                .list_cards(index)
                .await?
                .into_iter()
                .map(|text| card_from_text(name, text))
                .collect::<Result<Vec<_>>>()?;
            columns.push((name.to_string(), cards));
        }

        let board = Board::try_from_columns(columns)?;
        tracing::debug!(
            columns = board.column_count(),
            cards = board.card_count(),
            "built board snapshot"
        );
        Ok(board)
    }
}

fn card_from_text(column: &str, text: CardText) -> Result<Card> {
    let name = text.title_text.trim();
    if name.is_empty() {
        return Err(KanbanError::not_found("card title", format!("in column '{}'", column)));
    }
    Ok(Card::new(name, subtask::parse(&text.subtask_label)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory::InMemorySurface;
    use crate::subtask::SubtaskProgress;

    #[test]
    fn test_column_name_strips_badge() {
        assert_eq!(column_name("DOING (3)"), "DOING");
        assert_eq!(column_name("  TODO  "), "TODO");
        assert_eq!(column_name("DONE(0)"), "DONE");
        assert_eq!(column_name("(2)"), "");
    }

    #[tokio::test]
    async fn test_build_reads_columns_and_cards_in_order() {
        let surface = InMemorySurface::builder()
            .column("TODO", |c| c.card("Plan", &[false, false]))
            .column("DOING", |c| c.card("Build", &[true, false, false]).card("Ship", &[true]))
            .column("DONE", |c| c)
            .build();

        let board = BoardSnapshotBuilder::new(&surface).build().await.unwrap();

        assert_eq!(board.column_names().collect::<Vec<_>>(), vec!["TODO", "DOING", "DONE"]);
        let doing = board.cards_in("DOING");
        assert_eq!(doing[0].name, "Build");
        assert_eq!(doing[0].subtasks.progress, SubtaskProgress::Parsed { completed: 1, total: 3 });
        assert_eq!(doing[0].subtasks.raw, "1 of 3 subtasks");
        assert_eq!(doing[1].name, "Ship");
        assert!(board.cards_in("DONE").is_empty());
    }

    #[tokio::test]
    async fn test_build_is_idempotent() {
        let surface = InMemorySurface::sample();
        let builder = BoardSnapshotBuilder::new(&surface);
        assert_eq!(builder.build().await.unwrap(), builder.build().await.unwrap());
    }

    #[tokio::test]
    async fn test_blank_title_is_not_found() {
        let surface =
            InMemorySurface::builder().column("TODO", |c| c.card("   ", &[false])).build();
        let err = BoardSnapshotBuilder::new(&surface).build().await.unwrap_err();
        assert!(err.is_not_found());
    }
}
