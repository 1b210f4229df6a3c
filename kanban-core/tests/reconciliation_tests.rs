use async_trait::async_trait;
use kanban_core::checks::{self, ReconciliationChecks};
use kanban_core::{
    BoardSnapshotBuilder, CardLocation, CardText, ColumnHeader, InMemorySurface, KanbanError,
    RenderingSurface, Result, SubtaskRow, SurfaceCommand, actions, partition, query,
};
use std::sync::atomic::{AtomicUsize, Ordering};

// --- Mocks ---

/// Delegates to an in-memory board and counts the reads it receives.
struct CountingSurface {
    inner: InMemorySurface,
    column_reads: AtomicUsize,
    card_reads: AtomicUsize,
}

impl CountingSurface {
    fn new(inner: InMemorySurface) -> Self {
        Self { inner, column_reads: AtomicUsize::new(0), card_reads: AtomicUsize::new(0) }
    }

    fn reads(&self) -> (usize, usize) {
        (self.column_reads.load(Ordering::SeqCst), self.card_reads.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl RenderingSurface for CountingSurface {
    async fn list_columns(&self) -> Result<Vec<ColumnHeader>> {
        self.column_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_columns().await
    }

    async fn list_cards(&self, column_index: usize) -> Result<Vec<CardText>> {
        self.card_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_cards(column_index).await
    }

    async fn find_card(&self, name: &str) -> Result<Option<CardLocation>> {
        self.inner.find_card(name).await
    }

    async fn command(&self, command: SurfaceCommand) -> Result<()> {
        self.inner.command(command).await
    }

    async fn read_subtask_label_near(&self, card_name: &str) -> Result<String> {
        self.inner.read_subtask_label_near(card_name).await
    }

    async fn subtask_rows(&self, card_name: &str) -> Result<Vec<SubtaskRow>> {
        self.inner.subtask_rows(card_name).await
    }

    async fn visible_subtask_rows(&self) -> Result<Vec<SubtaskRow>> {
        self.inner.visible_subtask_rows().await
    }
}

/// Board whose header or card reads fail the way a missing element does.
struct MissingElementSurface {
    inner: InMemorySurface,
    missing_header: bool,
}

#[async_trait]
impl RenderingSurface for MissingElementSurface {
    async fn list_columns(&self) -> Result<Vec<ColumnHeader>> {
        if self.missing_header {
            return Err(KanbanError::not_found("column header", "#0"));
        }
        self.inner.list_columns().await
    }

    async fn list_cards(&self, column_index: usize) -> Result<Vec<CardText>> {
        if column_index == 1 {
            return Err(KanbanError::not_found("card title", "column #1 card #0"));
        }
        self.inner.list_cards(column_index).await
    }

    async fn find_card(&self, name: &str) -> Result<Option<CardLocation>> {
        self.inner.find_card(name).await
    }

    async fn command(&self, command: SurfaceCommand) -> Result<()> {
        self.inner.command(command).await
    }

    async fn read_subtask_label_near(&self, card_name: &str) -> Result<String> {
        self.inner.read_subtask_label_near(card_name).await
    }

    async fn subtask_rows(&self, card_name: &str) -> Result<Vec<SubtaskRow>> {
        self.inner.subtask_rows(card_name).await
    }

    async fn visible_subtask_rows(&self) -> Result<Vec<SubtaskRow>> {
        self.inner.visible_subtask_rows().await
    }
}

// --- Tests ---

#[tokio::test]
async fn snapshot_reads_every_column_once() {
    let surface = CountingSurface::new(InMemorySurface::sample());
    let board = BoardSnapshotBuilder::new(&surface).build().await.unwrap();

    assert_eq!(board.column_names().collect::<Vec<_>>(), vec!["TODO", "DOING", "DONE"]);
    assert_eq!(surface.reads(), (1, 3));
}

#[tokio::test]
async fn snapshots_are_fresh_and_idempotent() {
    let surface = CountingSurface::new(InMemorySurface::sample());
    let builder = BoardSnapshotBuilder::new(&surface);

    let first = builder.build().await.unwrap();
    let second = builder.build().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(surface.reads(), (2, 6));

    actions::open_card(&surface, "Add search endpoints").await.unwrap();
    actions::delete_card(&surface, "Add search endpoints").await.unwrap();
    let third = builder.build().await.unwrap();
    assert_ne!(first, third);
    assert_eq!(third.cards_in("TODO").len(), 1);
}

#[tokio::test]
async fn delete_shrinks_source_column_by_one() {
    let surface = InMemorySurface::sample();
    let live = ReconciliationChecks::new(&surface);
    let board = BoardSnapshotBuilder::new(&surface).build().await.unwrap();

    let split = partition::split(&board).unwrap();
    let candidate = query::first_non_empty_column_after_head(&split.incomplete).unwrap();
    let card = candidate.first_card().unwrap().name.clone();
    let before = live.column_card_count(&candidate.column).await.unwrap();

    actions::open_card(&surface, &card).await.unwrap();
    actions::check_all_subtasks(&surface, &card).await.unwrap();
    actions::move_to_first_status(&surface).await.unwrap();
    live.subtasks_struck_through().await.unwrap();
    actions::delete_card(&surface, &card).await.unwrap();

    live.expect_card_absent(&card).await.unwrap();
    live.expect_count(&candidate.column, before - 1).await.unwrap();
    assert!(live.expect_count(&candidate.column, before).await.is_err());
}

#[tokio::test]
async fn edit_completes_card_and_moves_it_first() {
    let surface = InMemorySurface::sample();
    let live = ReconciliationChecks::new(&surface);
    let card = "Add account management endpoints";

    let board = BoardSnapshotBuilder::new(&surface).build().await.unwrap();
    let original = board.locate(card).unwrap().unwrap().1.subtasks.counts(card).unwrap();
    assert_eq!((original.completed, original.total), (2, 3));

    actions::open_card(&surface, card).await.unwrap();
    assert_eq!(actions::check_all_subtasks(&surface, card).await.unwrap(), 1);
    actions::move_to_first_status(&surface).await.unwrap();
    actions::save_card(&surface, card).await.unwrap();

    actions::open_card(&surface, card).await.unwrap();
    let updated = live.subtasks_info(card).await.unwrap();
    assert!(updated.is_complete());
    assert_eq!(updated.total, original.total);

    assert!(live.verify_card_in_column(card, "TODO").await.unwrap());
    assert!(!live.verify_card_in_column(card, "DOING").await.unwrap());
}

#[tokio::test]
async fn unparsable_label_blocks_partition() {
    let surface = InMemorySurface::builder()
        .column("TODO", |c| c.card("Plan", &[false]))
        .column("DOING", |c| c.card_with_label("Mystery", "no progress yet"))
        .build();

    let board = BoardSnapshotBuilder::new(&surface).build().await.unwrap();
    let err = partition::split(&board).unwrap_err();
    assert!(matches!(err, KanbanError::Unparsable { ref card, .. } if card == "Mystery"));
}

#[tokio::test]
async fn duplicate_titles_are_rejected() {
    let surface = InMemorySurface::builder()
        .column("TODO", |c| c.card("Same", &[false]))
        .column("DOING", |c| c.card("Same", &[true]))
        .build();

    let err = surface.find_card("Same").await.unwrap_err();
    assert!(matches!(err, KanbanError::DuplicateCard { .. }));

    let board = BoardSnapshotBuilder::new(&surface).build().await.unwrap();
    assert!(matches!(board.locate("Same"), Err(KanbanError::DuplicateCard { .. })));
}

#[tokio::test]
async fn membership_checks_follow_fresh_snapshots() {
    let surface = InMemorySurface::sample();
    let before = BoardSnapshotBuilder::new(&surface).build().await.unwrap();
    checks::expect_card_in_column(&before, "Research pricing points", "DOING").unwrap();

    actions::open_card(&surface, "Research pricing points").await.unwrap();
    actions::move_to_first_status(&surface).await.unwrap();

    // The stored snapshot is stale; a new one reflects the move.
    checks::expect_card_in_column(&before, "Research pricing points", "DOING").unwrap();
    let after = BoardSnapshotBuilder::new(&surface).build().await.unwrap();
    checks::expect_card_in_column(&after, "Research pricing points", "TODO").unwrap();
    checks::expect_card_not_in_column(&after, "Research pricing points", "DOING").unwrap();
}

#[tokio::test]
async fn snapshot_propagates_missing_card_title() {
    let surface = MissingElementSurface { inner: InMemorySurface::sample(), missing_header: false };
    let err = BoardSnapshotBuilder::new(&surface).build().await.unwrap_err();

    assert!(matches!(
        err,
        KanbanError::NotFound { ref what, ref name }
            if what == "card title" && name == "column #1 card #0"
    ));
}

#[tokio::test]
async fn snapshot_propagates_missing_header() {
    let surface = MissingElementSurface { inner: InMemorySurface::sample(), missing_header: true };
    let err = BoardSnapshotBuilder::new(&surface).build().await.unwrap_err();

    assert!(matches!(
        err,
        KanbanError::NotFound { ref what, ref name } if what == "column header" && name == "#0"
    ));
}
