//! Scenario result reporting
//!
//! Structures for recording the steps of a scenario run and formatting them.

use chrono::{DateTime, Utc};
use kanban_core::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::Instrument;

/// Final state of a scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    Passed,
    /// A check or surface call failed.
    Failed,
    /// The board did not allow the scenario to start.
    PreconditionFailed,
}

/// The card a scenario acted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioTarget {
    pub card: String,
    pub column: String,
}

/// One named step of a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub name: String,
    pub passed: bool,
    pub duration: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Complete report for one scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub status: ScenarioStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ScenarioTarget>,
    pub steps: Vec<StepRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration: Duration,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }

    /// Steps that did not pass.
    pub fn failures(&self) -> Vec<&StepRecord> {
        self.steps.iter().filter(|s| !s.passed).collect()
    }

    /// Format as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Scenario: {}\n", self.scenario));
        output.push_str(&format!("Status: {:?}\n", self.status));
        if let Some(target) = &self.target {
            output.push_str(&format!("Target: '{}' in {}\n", target.card, target.column));
        }
        output.push_str(&format!("Duration: {:?}\n", self.duration));

        output.push_str("\nSteps:\n");
        for step in &self.steps {
            let mark = if step.passed { "ok" } else { "FAILED" };
            output.push_str(&format!("  [{}] {} ({:?})\n", mark, step.name, step.duration));
            if let Some(error) = &step.error {
                output.push_str(&format!("        {}\n", error));
            }
        }

        if let Some(error) = &self.error {
            output.push_str(&format!("\nError: {}\n", error));
        }
        output
    }

    /// Export to JSON
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Collects step records while a scenario runs.
#[derive(Debug)]
pub struct StepLog {
    scenario: String,
    steps: Vec<StepRecord>,
    target: Option<ScenarioTarget>,
    started_at: DateTime<Utc>,
    clock: Instant,
}

impl StepLog {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            steps: Vec::new(),
            target: None,
            started_at: Utc::now(),
            clock: Instant::now(),
        }
    }

    /// Run `step` inside its own span and record how it went.
    pub async fn step<T, F>(&mut self, name: &str, step: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let result = step.instrument(kanban_telemetry::step_span(name)).await;
        let error = result.as_ref().err().map(ToString::to_string);

        match &error {
            None => tracing::info!(step = name, "step passed"),
            Some(error) => tracing::warn!(step = name, %error, "step failed"),
        }

        self.steps.push(StepRecord {
            name: name.to_string(),
            passed: error.is_none(),
            duration: started.elapsed(),
            error,
        });
        result
    }

    pub fn set_target(&mut self, card: &str, column: &str) {
        kanban_telemetry::record_target(card, column);
        self.target = Some(ScenarioTarget { card: card.to_string(), column: column.to_string() });
    }

    /// Close the log with the scenario outcome.
    pub fn finish(self, outcome: Result<()>) -> ScenarioReport {
        let (status, error) = match outcome {
            Ok(()) => (ScenarioStatus::Passed, None),
            Err(e @ KanbanError::PreconditionViolation(_)) => {
                (ScenarioStatus::PreconditionFailed, Some(e.to_string()))
            }
            Err(e) => (ScenarioStatus::Failed, Some(e.to_string())),
        };

        ScenarioReport {
            scenario: self.scenario,
            status,
            target: self.target,
            steps: self.steps,
            error,
            started_at: self.started_at,
            completed_at: Utc::now(),
            duration: self.clock.elapsed(),
        }
    }
}
