//! # Kanban Telemetry
//!
//! Structured logging for board checks using `tracing`.
//!
//! ## Usage
//!
//! ```rust
//! use kanban_telemetry::{info, init_telemetry, scenario_span};
//!
//! init_telemetry("kanban-check");
//! let span = scenario_span("delete_card");
//! let _enter = span.enter();
//! info!("scenario started");
//! ```

pub mod init;
pub mod spans;

// Re-export tracing macros for convenience
pub use tracing::{Span, debug, error, info, instrument, trace, warn};

pub use init::{LogFormat, init_json_telemetry, init_telemetry, init_with_format};
pub use spans::*;
