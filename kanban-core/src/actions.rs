//! Multi-step user actions composed from [`SurfaceCommand`]s.

use crate::error::Result;
use crate::surface::{RenderingSurface, SurfaceCommand};

/// Open the detail view of `card`.
pub async fn open_card<S: RenderingSurface + ?Sized>(surface: &S, card: &str) -> Result<()> {
    surface.command(SurfaceCommand::OpenCard(card.to_string())).await
}

/// Tick every unchecked subtask of the open card. Returns how many were ticked.
pub async fn check_all_subtasks<S: RenderingSurface + ?Sized>(
    surface: &S,
    card: &str,
) -> Result<usize> {
    let rows = surface.subtask_rows(card).await?;
    let mut checked = 0;
    for (index, row) in rows.iter().enumerate() {
        if !row.checked {
            surface.command(SurfaceCommand::CheckSubtask { card: card.to_string(), index }).await?;
            checked += 1;
        }
    }
    tracing::debug!(card, checked, total = rows.len(), "checked subtasks");
    Ok(checked)
}

/// Move the open card to the first status in the selector.
pub async fn move_to_first_status<S: RenderingSurface + ?Sized>(surface: &S) -> Result<()> {
    surface.command(SurfaceCommand::OpenStatusSelector).await?;
    surface.command(SurfaceCommand::ChooseFirstStatus).await
}

/// Delete the open card through its menu and confirm the prompt.
pub async fn delete_card<S: RenderingSurface + ?Sized>(surface: &S, card: &str) -> Result<()> {
    surface.command(SurfaceCommand::OpenCardMenu(card.to_string())).await?;
    surface.command(SurfaceCommand::ChooseDelete).await?;
    surface.command(SurfaceCommand::ConfirmDelete).await
}

/// Open the edit form of the open card and submit it unchanged.
pub async fn save_card<S: RenderingSurface + ?Sized>(surface: &S, card: &str) -> Result<()> {
    surface.command(SurfaceCommand::OpenCardMenu(card.to_string())).await?;
    surface.command(SurfaceCommand::ChooseEdit).await?;
    surface.command(SurfaceCommand::Submit).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory::InMemorySurface;

    #[tokio::test]
    async fn test_check_all_only_ticks_unchecked() {
        let surface = InMemorySurface::sample();
        let card = "Add account management endpoints";
        open_card(&surface, card).await.unwrap();

        assert_eq!(check_all_subtasks(&surface, card).await.unwrap(), 1);
        assert_eq!(check_all_subtasks(&surface, card).await.unwrap(), 0);
        assert!(surface.subtask_rows(card).await.unwrap().iter().all(|r| r.checked));
    }

    #[tokio::test]
    async fn test_delete_card_removes_it() {
        let surface = InMemorySurface::sample();
        let card = "Conduct 5 wireframe tests";
        open_card(&surface, card).await.unwrap();
        delete_card(&surface, card).await.unwrap();
        assert!(surface.find_card(card).await.unwrap().is_none());
        assert_eq!(surface.open_card().await, None);
    }

    #[tokio::test]
    async fn test_save_card_closes_view() {
        let surface = InMemorySurface::sample();
        let card = "Research pricing points";
        open_card(&surface, card).await.unwrap();
        save_card(&surface, card).await.unwrap();
        assert_eq!(surface.open_card().await, None);
    }

    #[tokio::test]
    async fn test_move_requires_open_card() {
        let surface = InMemorySurface::sample();
        assert!(move_to_first_status(&surface).await.is_err());
    }
}
