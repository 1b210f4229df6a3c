//! End-to-end board scenarios.
//!
//! Each scenario snapshots the board, picks a candidate card outside the
//! head column, drives the surface through a user flow and then checks the
//! resulting board against what the flow should have done.

use crate::report::{ScenarioReport, StepLog};
use async_trait::async_trait;
use kanban_core::checks::{self, ReconciliationChecks};
use kanban_core::{
    Board, BoardSnapshotBuilder, Card, KanbanError, RenderingSurface, Result, SubtaskCounts,
    actions, partition, query,
};
use tracing::Instrument;

/// A scripted user flow with post-conditions.
#[async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &str;

    /// Run against `surface`. Failures are captured in the report.
    async fn run(&self, surface: &dyn RenderingSurface) -> ScenarioReport;
}

/// Candidate picked from the incomplete half of the board.
struct Candidate {
    card: Card,
    column: String,
}

fn pick_incomplete_candidate(board: &Board, purpose: &str) -> Result<Candidate> {
    let split = partition::split(board)?;
    query::first_non_empty_column_after_head(&split.incomplete)
        .and_then(|info| {
            let column = info.column;
            info.cards.into_iter().next().map(|card| Candidate { card, column })
        })
        .ok_or_else(|| {
            KanbanError::PreconditionViolation(format!("no incomplete cards found for {}", purpose))
        })
}

/// Complete a card's subtasks, move it to the first column, then delete it.
///
/// Passes when the card is gone and its original column shrank by one.
#[derive(Debug, Default, Clone)]
pub struct DeleteCardScenario;

impl DeleteCardScenario {
    pub fn new() -> Self {
        Self
    }

    async fn execute(&self, surface: &dyn RenderingSurface, log: &mut StepLog) -> Result<()> {
        let live = ReconciliationChecks::new(surface);

        let (card, column, initial_count) = log
            .step("Find deletable card and get initial count", async {
                let board = BoardSnapshotBuilder::new(surface).build().await?;
                let candidate = pick_incomplete_candidate(&board, "deletion")?;
                let count = live.column_card_count(&candidate.column).await?;
                Ok::<_, KanbanError>((candidate.card.name, candidate.column, count))
            })
            .await?;
        log.set_target(&card, &column);

        log.step("Complete all subtasks and move to first status", async {
            actions::open_card(surface, &card).await?;
            actions::check_all_subtasks(surface, &card).await?;
            actions::move_to_first_status(surface).await?;
            live.subtasks_struck_through().await
        })
        .await?;

        log.step("Delete the card", actions::delete_card(surface, &card)).await?;

        log.step("Verify card is deleted", live.expect_card_absent(&card)).await?;

        log.step("Verify column count decreased by 1", async {
            let expected = initial_count.checked_sub(1).ok_or_else(|| {
                KanbanError::PreconditionViolation(format!("column '{}' was empty", column))
            })?;
            live.expect_count(&column, expected).await
        })
        .await
    }
}

#[async_trait]
impl Scenario for DeleteCardScenario {
    fn name(&self) -> &str {
        "delete_card"
    }

    async fn run(&self, surface: &dyn RenderingSurface) -> ScenarioReport {
        let span = kanban_telemetry::scenario_span(self.name());
        let mut log = StepLog::new(self.name());
        let outcome = self.execute(surface, &mut log).instrument(span).await;
        log.finish(outcome)
    }
}

/// Complete a card's subtasks, move it to the first column and save it.
///
/// Passes when the saved card shows more completed subtasks out of the same
/// total and sits in the first column instead of its original one.
#[derive(Debug, Default, Clone)]
pub struct EditCardScenario;

impl EditCardScenario {
    pub fn new() -> Self {
        Self
    }

    async fn execute(&self, surface: &dyn RenderingSurface, log: &mut StepLog) -> Result<()> {
        let live = ReconciliationChecks::new(surface);

        let (card, original_column, first_column, original) = log
            .step("Find card with incomplete subtasks not in first column", async {
                let board = BoardSnapshotBuilder::new(surface).build().await?;
                let first_column = query::first_column_name(&board)?.to_string();
                let candidate = pick_incomplete_candidate(&board, "editing")?;

                if candidate.column == first_column {
                    return Err(KanbanError::PreconditionViolation(
                        "selected card is already in the first column".to_string(),
                    ));
                }
                let original = candidate.card.subtasks.counts(&candidate.card.name)?;
                let Candidate { card, column } = candidate;
                Ok::<_, KanbanError>((card.name, column, first_column, original))
            })
            .await?;
        log.set_target(&card, &original_column);

        log.step("Open card and complete all subtasks", async {
            actions::open_card(surface, &card).await?;
            actions::check_all_subtasks(surface, &card).await.map(|_| ())
        })
        .await?;

        log.step("Move card to first column", actions::move_to_first_status(surface)).await?;

        log.step("Verify completed subtasks are struck through", live.subtasks_struck_through())
            .await?;

        log.step("Save and close the card", actions::save_card(surface, &card)).await?;

        log.step("Verify subtasks completion count is correct", async {
            actions::open_card(surface, &card).await?;
            let updated = live.subtasks_info(&card).await?;
            verify_progress(original, updated)
        })
        .await?;

        log.step("Verify card moved to first column", async {
            let board = BoardSnapshotBuilder::new(surface).build().await?;
            checks::expect_card_in_column(&board, &card, &first_column)?;
            checks::expect_card_not_in_column(&board, &card, &original_column)
        })
        .await
    }
}

#[async_trait]
impl Scenario for EditCardScenario {
    fn name(&self) -> &str {
        "edit_card"
    }

    async fn run(&self, surface: &dyn RenderingSurface) -> ScenarioReport {
        let span = kanban_telemetry::scenario_span(self.name());
        let mut log = StepLog::new(self.name());
        let outcome = self.execute(surface, &mut log).instrument(span).await;
        log.finish(outcome)
    }
}

/// Completed count went up, total stayed, and completed does not exceed total.
fn verify_progress(original: SubtaskCounts, updated: SubtaskCounts) -> Result<()> {
    if updated.total != original.total {
        return Err(KanbanError::check_failed(
            "subtask_total",
            format!("total changed from {} to {}", original.total, updated.total),
        ));
    }
    if updated.completed <= original.completed {
        return Err(KanbanError::check_failed(
            "subtask_completed",
            format!("completed did not increase ({} -> {})", original.completed, updated.completed),
        ));
    }
    if updated.completed > updated.total {
        return Err(KanbanError::check_failed(
            "subtask_completed",
            format!("completed {} exceeds total {}", updated.completed, updated.total),
        ));
    }
    Ok(())
}

/// Look up a scenario by its CLI name.
pub fn by_name(name: &str) -> Option<Box<dyn Scenario>> {
    match name {
        "delete_card" | "delete-card" => Some(Box::new(DeleteCardScenario::new())),
        "edit_card" | "edit-card" => Some(Box::new(EditCardScenario::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_progress() {
        let original = SubtaskCounts { completed: 1, total: 3 };
        assert!(verify_progress(original, SubtaskCounts { completed: 3, total: 3 }).is_ok());
        assert!(verify_progress(original, SubtaskCounts { completed: 1, total: 3 }).is_err());
        assert!(verify_progress(original, SubtaskCounts { completed: 3, total: 4 }).is_err());
        assert!(verify_progress(original, SubtaskCounts { completed: 4, total: 3 }).is_err());
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("delete-card").unwrap().name(), "delete_card");
        assert_eq!(by_name("edit_card").unwrap().name(), "edit_card");
        assert!(by_name("archive").is_none());
    }
}
