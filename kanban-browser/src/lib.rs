//! # kanban-browser
//!
//! A WebDriver-backed [`RenderingSurface`](kanban_core::RenderingSurface)
//! for kanban board checks, built on thirtyfour.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kanban_browser::{BrowserConfig, BrowserSession, WebBoardSurface};
//! use kanban_core::BoardSnapshotBuilder;
//! use std::sync::Arc;
//!
//! async fn example() -> kanban_core::Result<()> {
//!     let session = Arc::new(BrowserSession::new(BrowserConfig::new().headless(true)));
//!     session.start().await?;
//!
//!     let surface = WebBoardSurface::with_default_locators(session.clone());
//!     surface.open_board("https://kanban-566d8.firebaseapp.com/").await?;
//!     let board = BoardSnapshotBuilder::new(&surface).build().await?;
//!     println!("{} columns", board.column_count());
//!
//!     session.stop().await
//! }
//! ```
//!
//! ## Requirements
//!
//! A WebDriver server (ChromeDriver, geckodriver or Selenium) must be
//! reachable, by default at `http://localhost:4444`:
//!
//! ```bash
//! docker run -d -p 4444:4444 selenium/standalone-chrome
//! ```
//!
//! ## Locators
//!
//! Where columns, cards and dialog controls live in the page is described
//! by [`BoardLocators`]. The defaults fit the reference board; every field
//! can be overridden from configuration.

mod config;
mod session;
mod surface;

pub use config::{BoardLocators, BrowserConfig, BrowserType, xpath_literal};
pub use session::{BrowserSession, shared_session};
pub use surface::WebBoardSurface;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{BoardLocators, BrowserConfig, BrowserType};
    pub use crate::session::{BrowserSession, shared_session};
    pub use crate::surface::WebBoardSurface;
}
