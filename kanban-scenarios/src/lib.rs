//! # kanban-scenarios
//!
//! User-flow scenarios for kanban boards and the `kanban-check` runner.
//!
//! A scenario drives any [`RenderingSurface`](kanban_core::RenderingSurface)
//! and returns a [`ScenarioReport`]; it never panics on a failed check.
//!
//! ```rust
//! use kanban_core::InMemorySurface;
//! use kanban_scenarios::{DeleteCardScenario, Scenario};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let surface = InMemorySurface::sample();
//! let report = DeleteCardScenario::new().run(&surface).await;
//! assert!(report.passed(), "{}", report.format_summary());
//! # }
//! ```

pub mod config;
pub mod report;
pub mod scenario;

pub use config::{DEFAULT_BOARD_URL, KanbanConfig};
pub use report::{ScenarioReport, ScenarioStatus, ScenarioTarget, StepLog, StepRecord};
pub use scenario::{DeleteCardScenario, EditCardScenario, Scenario, by_name};
