mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use kanban_browser::{WebBoardSurface, shared_session};
use kanban_core::{BoardSnapshotBuilder, InMemorySurface, RenderingSurface};
use kanban_scenarios::{KanbanConfig, scenario};
use kanban_telemetry::LogFormat;
use tracing::Instrument;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.json { LogFormat::Json } else { LogFormat::Pretty };
    kanban_telemetry::init_with_format("kanban-check", format, "info");

    let config = KanbanConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if cli.sample {
        let surface = InMemorySurface::sample();
        return execute(&cli.command, &surface, cli.report).await;
    }

    let session = shared_session(config.browser.clone());
    session.start().await.context("Failed to start browser session")?;

    let surface = WebBoardSurface::new(session.clone(), config.locators.clone());
    let outcome = match surface.open_board(&config.board_url).await {
        Ok(()) => execute(&cli.command, &surface, cli.report).await,
        Err(e) => {
            Err(anyhow::Error::new(e).context(format!("Failed to open {}", config.board_url)))
        }
    };

    if let Err(e) = session.stop().await {
        tracing::warn!(error = %e, "failed to stop browser session");
    }
    outcome
}

async fn execute(
    command: &Commands,
    surface: &dyn RenderingSurface,
    report_json: bool,
) -> Result<()> {
    let Some(name) = command.scenario_name() else {
        let board = BoardSnapshotBuilder::new(surface)
            .build()
            .instrument(kanban_telemetry::snapshot_span())
            .await?;
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    };

    let scenario = scenario::by_name(name).with_context(|| format!("Unknown scenario: {}", name))?;
    let report = scenario.run(surface).await;

    if report_json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.format_summary());
    }

    if !report.passed() {
        anyhow::bail!(
            "scenario '{}' did not pass: {}",
            report.scenario,
            report.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}
