//! Run configuration for the scenario runner.

use kanban_browser::{BoardLocators, BrowserConfig};
use kanban_core::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BOARD_URL: &str = "https://kanban-566d8.firebaseapp.com/";

/// Everything needed to reach and read a board.
///
/// Loaded from TOML; every field is optional and environment variables win
/// over the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanbanConfig {
    pub board_url: String,
    pub browser: BrowserConfig,
    pub locators: BoardLocators,
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self {
            board_url: DEFAULT_BOARD_URL.to_string(),
            browser: BrowserConfig::default(),
            locators: BoardLocators::default(),
        }
    }
}

impl KanbanConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| KanbanError::Config(format!("Invalid config: {}", e)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading config");
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Load `path` when given, defaults otherwise, then apply the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides()
    }

    /// Apply `WEBDRIVER_URL`, `KANBAN_BOARD_URL` and `KANBAN_HEADLESS`.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    pub fn apply_env_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup("WEBDRIVER_URL") {
            self.browser.webdriver_url = url;
        }
        if let Some(url) = lookup("KANBAN_BOARD_URL") {
            self.board_url = url;
        }
        if let Some(raw) = lookup("KANBAN_HEADLESS") {
            self.browser.headless = parse_flag(&raw).ok_or_else(|| {
                KanbanError::Config(format!("KANBAN_HEADLESS must be true or false, got '{}'", raw))
            })?;
        }
        Ok(self)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
