//! # kanban-core
//!
//! Typed snapshots of a rendered kanban board and the checks used to verify
//! what a user action did to it.
//!
//! ## Overview
//!
//! A [`RenderingSurface`] is anything that can show the live board: a
//! WebDriver session (see `kanban-browser`) or the [`InMemorySurface`] used
//! in tests. On top of it this crate provides:
//!
//! - [`subtask::parse`] turning `"2 of 5 subtasks"` into [`SubtaskInfo`]
//! - [`BoardSnapshotBuilder`] reading a full [`Board`]
//! - [`partition::split`] separating finished cards from open ones
//! - [`query`] helpers for picking candidate columns
//! - [`ReconciliationChecks`] for post-action assertions
//!
//! ## Quick Start
//!
//! ```rust
//! use kanban_core::{BoardSnapshotBuilder, InMemorySurface, partition, query};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> kanban_core::Result<()> {
//! let surface = InMemorySurface::sample();
//! let board = BoardSnapshotBuilder::new(&surface).build().await?;
//! let split = partition::split(&board)?;
//!
//! let candidate = query::first_non_empty_column_after_head(&split.incomplete);
//! assert_eq!(candidate.map(|c| c.column), Some("DOING".to_string()));
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod board;
pub mod checks;
pub mod error;
pub mod inmemory;
pub mod partition;
pub mod query;
pub mod snapshot;
pub mod subtask;
pub mod surface;

pub use board::{Board, Card, ColumnInfo};
pub use checks::ReconciliationChecks;
pub use error::{KanbanError, Result};
pub use inmemory::{ColumnBuilder, InMemorySurface, InMemorySurfaceBuilder};
pub use partition::BoardPartition;
pub use query::HeadColumn;
pub use snapshot::BoardSnapshotBuilder;
pub use subtask::{SubtaskCounts, SubtaskInfo, SubtaskProgress};
pub use surface::{
    CardLocation, CardText, ColumnHeader, RenderingSurface, SubtaskRow, SurfaceCommand,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::board::{Board, Card, ColumnInfo};
    pub use crate::checks::ReconciliationChecks;
    pub use crate::error::{KanbanError, Result};
    pub use crate::query::HeadColumn;
    pub use crate::snapshot::BoardSnapshotBuilder;
    pub use crate::surface::{RenderingSurface, SurfaceCommand};
}
