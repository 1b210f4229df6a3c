use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban-check")]
#[command(about = "Run user-flow checks against a kanban board", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML file with board URL, browser and locator settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the scenario report as JSON instead of a summary
    #[arg(long, global = true)]
    pub report: bool,

    /// Use the built-in sample board instead of a browser
    #[arg(long, global = true)]
    pub sample: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the current board as JSON
    Snapshot,

    /// Complete a card's subtasks, move it to the first column and delete it
    DeleteCard,

    /// Complete a card's subtasks, move it to the first column and save it
    EditCard,
}

impl Commands {
    /// Scenario run by this command, if any.
    pub fn scenario_name(&self) -> Option<&'static str> {
        match self {
            Commands::Snapshot => None,
            Commands::DeleteCard => Some("delete_card"),
            Commands::EditCard => Some("edit_card"),
        }
    }
}
