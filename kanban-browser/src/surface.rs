//! [`RenderingSurface`] over a live WebDriver session.

use crate::config::BoardLocators;
use crate::session::BrowserSession;
use async_trait::async_trait;
use kanban_core::{
    CardLocation, CardText, ColumnHeader, KanbanError, RenderingSurface, Result, SubtaskRow,
    SurfaceCommand,
};
use std::sync::Arc;
use thirtyfour::prelude::*;
use tracing::Instrument;

/// The kanban web application as seen through a browser.
pub struct WebBoardSurface {
    session: Arc<BrowserSession>,
    locators: BoardLocators,
}

impl WebBoardSurface {
    pub fn new(session: Arc<BrowserSession>, locators: BoardLocators) -> Self {
        Self { session, locators }
    }

    pub fn with_default_locators(session: Arc<BrowserSession>) -> Self {
        Self::new(session, BoardLocators::default())
    }

    pub fn session(&self) -> &Arc<BrowserSession> {
        &self.session
    }

    pub fn locators(&self) -> &BoardLocators {
        &self.locators
    }

    /// Navigate to the board and wait for its first column to render.
    pub async fn open_board(&self, url: &str) -> Result<()> {
        self.session.navigate(url).await?;
        self.session.wait_for_element(&self.locators.columns_css).await?;
        tracing::info!(url, "board loaded");
        Ok(())
    }

    async fn sections(&self) -> Result<Vec<WebElement>> {
        self.session.find_elements(&self.locators.columns_css).await
    }

    async fn card_xpath_matches(&self, template: &str, card: &str) -> Result<Vec<WebElement>> {
        self.session.find_all_by_xpath(&BoardLocators::for_card(template, card)).await
    }

    async fn click_for_card(&self, template: &str, card: &str) -> Result<()> {
        self.session.click_xpath(&BoardLocators::for_card(template, card)).await
    }

    async fn dispatch(&self, command: SurfaceCommand) -> Result<()> {
        tracing::debug!(command = %command, "surface command");
        let locators = &self.locators;
        match command {
            SurfaceCommand::OpenCard(card) => self.click_for_card(&locators.card_tile, &card).await,
            SurfaceCommand::CheckSubtask { card, index } => {
                let checkboxes =
                    self.card_xpath_matches(&locators.subtask_checkboxes, &card).await?;
                let checkbox = checkboxes.get(index).ok_or_else(|| {
                    KanbanError::not_found("subtask", format!("#{} of '{}'", index, card))
                })?;
                if checkbox.is_selected().await.map_err(surface_error("read checkbox"))? {
                    return Ok(());
                }
                let label = first(
                    find_all(checkbox, By::XPath("ancestor::label")).await?,
                    "subtask label",
                    &format!("#{} of '{}'", index, card),
                )?;
                label.click().await.map_err(surface_error("click subtask"))
            }
            SurfaceCommand::OpenStatusSelector => {
                self.session.click_xpath(&locators.status_dropdown).await
            }
            SurfaceCommand::ChooseFirstStatus => {
                let options = self.session.find_all_by_xpath(&locators.status_options).await?;
                let option = first(options, "status option", "first")?;
                option.click().await.map_err(surface_error("choose status"))
            }
            SurfaceCommand::OpenCardMenu(card) => {
                self.click_for_card(&locators.card_menu, &card).await
            }
            SurfaceCommand::ChooseEdit => self.session.click_xpath(&locators.edit_option).await,
            SurfaceCommand::ChooseDelete => self.session.click_xpath(&locators.delete_option).await,
            SurfaceCommand::ConfirmDelete => {
                self.session.click_xpath(&locators.confirm_delete_button).await?;
                // The prompt closes once the board has dropped the card.
                self.session.wait_for_absent(&locators.confirm_delete_button).await
            }
            SurfaceCommand::CancelDelete => {
                self.session.click_xpath(&locators.cancel_delete_button).await
            }
            SurfaceCommand::Submit => self.session.click_xpath(&locators.submit_button).await,
        }
    }

    /// Checkbox, title and styling of one subtask `<label>`.
    async fn row_from_label(&self, label: &WebElement) -> Result<SubtaskRow> {
        let checkbox = first(
            find_all(label, By::Css("input[type='checkbox']")).await?,
            "subtask checkbox",
            "in label",
        )?;
        let checked = checkbox.is_selected().await.map_err(surface_error("read checkbox"))?;
        let title = text_of(label).await?;

        let mut struck_through = false;
        for span in find_all(label, By::Css("span")).await? {
            let class = span.attr("class").await.map_err(surface_error("read class"))?;
            let completed = &self.locators.completed_class;
            if class.is_some_and(|c| c.split_whitespace().any(|token| token == completed)) {
                struck_through = true;
                break;
            }
        }

        Ok(SubtaskRow { title, checked, struck_through })
    }
}

#[async_trait]
impl RenderingSurface for WebBoardSurface {
    async fn list_columns(&self) -> Result<Vec<ColumnHeader>> {
        let mut headers = Vec::new();
        for (index, section) in self.sections().await?.iter().enumerate() {
            let header = first(
                find_all(section, By::Css(self.locators.column_header_css.as_str())).await?,
                "column header",
                &format!("#{}", index),
            )?;
            let header_text = text_of(&header).await?;
            let card_count =
                find_all(section, By::Css(self.locators.card_css.as_str())).await?.len();
            headers.push(ColumnHeader { header_text, card_count });
        }
        Ok(headers)
    }

    async fn list_cards(&self, column_index: usize) -> Result<Vec<CardText>> {
        let sections = self.sections().await?;
        let section = sections
            .get(column_index)
            .ok_or_else(|| KanbanError::not_found("column", format!("#{}", column_index)))?;

        let mut cards = Vec::new();
        let articles = find_all(section, By::Css(self.locators.card_css.as_str())).await?;
        for (position, article) in articles.iter().enumerate() {
            let position_desc = format!("column #{} card #{}", column_index, position);
            let title = first(
                find_all(article, By::Css(self.locators.card_title_css.as_str())).await?,
                "card title",
                &position_desc,
            )?;
            let label = first(
                find_all(article, By::Css(self.locators.card_subtasks_css.as_str())).await?,
                "subtask label",
                &position_desc,
            )?;
            cards.push(CardText {
                title_text: text_of(&title).await?,
                subtask_label: text_of(&label).await?,
            });
        }
        Ok(cards)
    }

    async fn find_card(&self, name: &str) -> Result<Option<CardLocation>> {
        match self.card_xpath_matches(&self.locators.card_tile, name).await?.len() {
            0 => return Ok(None),
            1 => {}
            _ => return Err(KanbanError::DuplicateCard { name: name.to_string() }),
        }

        for (column_index, section) in self.sections().await?.iter().enumerate() {
            let articles = find_all(section, By::Css(self.locators.card_css.as_str())).await?;
            for (position, article) in articles.iter().enumerate() {
                let titles =
                    find_all(article, By::Css(self.locators.card_title_css.as_str())).await?;
                if let Some(title) = titles.first() {
                    if text_of(title).await?.trim() == name {
                        return Ok(Some(CardLocation { column_index, position }));
                    }
                }
            }
        }
        // Rendered, but outside any column section.
        Err(KanbanError::not_found("column containing card", name))
    }

    async fn command(&self, command: SurfaceCommand) -> Result<()> {
        let span = kanban_telemetry::surface_command_span(&command);
        self.dispatch(command).instrument(span).await
    }

    async fn read_subtask_label_near(&self, card_name: &str) -> Result<String> {
        let labels = self.card_xpath_matches(&self.locators.subtask_label, card_name).await?;
        let label = first(labels, "subtask label", card_name)?;
        text_of(&label).await
    }

    async fn subtask_rows(&self, card_name: &str) -> Result<Vec<SubtaskRow>> {
        let mut rows = Vec::new();
        let checkboxes =
            self.card_xpath_matches(&self.locators.subtask_checkboxes, card_name).await?;
        for checkbox in checkboxes {
            let label = first(
                find_all(&checkbox, By::XPath("ancestor::label")).await?,
                "subtask label",
                card_name,
            )?;
            rows.push(self.row_from_label(&label).await?);
        }
        Ok(rows)
    }

    async fn visible_subtask_rows(&self) -> Result<Vec<SubtaskRow>> {
        let mut rows = Vec::new();
        for label in self.session.find_elements(&self.locators.subtask_rows_css).await? {
            rows.push(self.row_from_label(&label).await?);
        }
        Ok(rows)
    }
}

async fn find_all(parent: &WebElement, by: By) -> Result<Vec<WebElement>> {
    parent.find_all(by).await.map_err(surface_error("query elements"))
}

async fn text_of(element: &WebElement) -> Result<String> {
    element.text().await.map_err(surface_error("read text"))
}

fn first(elements: Vec<WebElement>, what: &str, name: &str) -> Result<WebElement> {
    elements.into_iter().next().ok_or_else(|| KanbanError::not_found(what, name))
}

fn surface_error(action: &'static str) -> impl Fn(WebDriverError) -> KanbanError {
    move |e| KanbanError::Surface(format!("Failed to {}: {}", action, e))
}
