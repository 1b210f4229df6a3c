//! Span helpers for board checks
//!
//! Pre-configured spans for scenarios, snapshots and surface commands.

use kanban_core::SurfaceCommand;
use tracing::Span;

/// Create a span covering one scenario run
///
/// # Example
/// ```
/// use kanban_telemetry::scenario_span;
/// let span = scenario_span("delete_card");
/// let _enter = span.enter();
/// ```
pub fn scenario_span(scenario: &str) -> Span {
    tracing::info_span!(
        "scenario.run",
        scenario.name = scenario,
        selected.card = tracing::field::Empty,
        selected.column = tracing::field::Empty,
    )
}

/// Create a span for a named scenario step
pub fn step_span(step: &str) -> Span {
    tracing::info_span!("scenario.step", step.name = step)
}

/// Create a span for reading a board snapshot
pub fn snapshot_span() -> Span {
    tracing::debug_span!("board.snapshot")
}

/// Create a span for a command sent to the rendering surface
pub fn surface_command_span(command: &SurfaceCommand) -> Span {
    tracing::debug_span!(
        "surface.command",
        command.action = command.action(),
        command.detail = %command,
    )
}

/// Record the card a scenario has selected on the current span
///
/// Only takes effect inside a [`scenario_span`].
pub fn record_target(card: &str, column: &str) {
    let span = Span::current();
    span.record("selected.card", card);
    span.record("selected.column", column);
}
