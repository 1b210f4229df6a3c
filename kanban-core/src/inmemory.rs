//! In-process rendering surface.
//!
//! Renders the same text a browser would show (count badges in headers,
//! `"1 of 3 subtasks"` on tiles) and enforces the dialog flow of the real
//! board: a card must be open before its subtasks can be checked, a menu must
//! be open before edit or delete can be chosen, and so on.

use crate::error::{KanbanError, Result};
use crate::surface::{
    CardLocation, CardText, ColumnHeader, RenderingSurface, SubtaskRow, SurfaceCommand,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct MemSubtask {
    title: String,
    done: bool,
}

#[derive(Debug, Clone)]
struct MemCard {
    title: String,
    subtasks: Vec<MemSubtask>,
    /// Rendered instead of the computed progress label when set.
    label: Option<String>,
}

impl MemCard {
    fn done_count(&self) -> usize {
        self.subtasks.iter().filter(|s| s.done).count()
    }

    fn tile_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("{} of {} subtasks", self.done_count(), self.subtasks.len()))
    }

    fn dialog_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| {
            format!("Subtasks ({} of {})", self.done_count(), self.subtasks.len())
        })
    }
}

#[derive(Debug, Clone)]
struct MemColumn {
    name: String,
    cards: Vec<MemCard>,
}

#[derive(Debug, Default)]
struct UiState {
    open_card: Option<String>,
    status_selector_open: bool,
    menu_open: bool,
    editing: bool,
    delete_prompt: bool,
}

#[derive(Debug)]
struct BoardState {
    columns: Vec<MemColumn>,
    ui: UiState,
    strike_completed: bool,
}

impl BoardState {
    fn locate(&self, name: &str) -> Result<Option<CardLocation>> {
        let mut found = None;
        for (column_index, column) in self.columns.iter().enumerate() {
            for (position, card) in column.cards.iter().enumerate() {
                if card.title.trim() == name {
                    if found.is_some() {
                        return Err(KanbanError::DuplicateCard { name: name.to_string() });
                    }
                    found = Some(CardLocation { column_index, position });
                }
            }
        }
        Ok(found)
    }

    fn card(&self, location: CardLocation) -> &MemCard {
        &self.columns[location.column_index].cards[location.position]
    }

    fn card_mut(&mut self, location: CardLocation) -> &mut MemCard {
        &mut self.columns[location.column_index].cards[location.position]
    }

    /// Location of the card whose detail view is open and titled `name`.
    fn open_card_named(&self, name: &str) -> Result<CardLocation> {
        if self.ui.open_card.as_deref() != Some(name) {
            return Err(KanbanError::not_found("open card", name));
        }
        self.locate(name)?.ok_or_else(|| KanbanError::not_found("card", name))
    }

    fn open_card(&self) -> Result<CardLocation> {
        let name = self
            .ui
            .open_card
            .as_deref()
            .ok_or_else(|| KanbanError::Surface("no card is open".to_string()))?;
        self.locate(name)?.ok_or_else(|| KanbanError::not_found("card", name))
    }

    fn rows(&self, location: CardLocation) -> Vec<SubtaskRow> {
        self.card(location)
            .subtasks
            .iter()
            .map(|s| SubtaskRow {
                title: s.title.clone(),
                checked: s.done,
                struck_through: s.done && self.strike_completed,
            })
            .collect()
    }

    fn apply(&mut self, command: SurfaceCommand) -> Result<()> {
        match command {
            SurfaceCommand::OpenCard(name) => {
                self.locate(&name)?.ok_or_else(|| KanbanError::not_found("card", &name))?;
                self.ui = UiState { open_card: Some(name), ..UiState::default() };
            }
            SurfaceCommand::CheckSubtask { card, index } => {
                let location = self.open_card_named(&card)?;
                let subtask =
                    self.card_mut(location).subtasks.get_mut(index).ok_or_else(|| {
                        KanbanError::not_found("subtask", format!("#{} of '{}'", index, card))
                    })?;
                subtask.done = true;
            }
            SurfaceCommand::OpenStatusSelector => {
                self.open_card()?;
                self.ui.status_selector_open = true;
            }
            SurfaceCommand::ChooseFirstStatus => {
                if !self.ui.status_selector_open {
                    return Err(KanbanError::Surface("status selector is not open".to_string()));
                }
                let location = self.open_card()?;
                if location.column_index != 0 {
                    let card = self.columns[location.column_index].cards.remove(location.position);
                    self.columns[0].cards.push(card);
                }
                self.ui.status_selector_open = false;
            }
            SurfaceCommand::OpenCardMenu(name) => {
                self.open_card_named(&name)?;
                self.ui.menu_open = true;
            }
            SurfaceCommand::ChooseEdit => {
                self.require(self.ui.menu_open, "card menu is not open")?;
                self.ui.menu_open = false;
                self.ui.editing = true;
            }
            SurfaceCommand::ChooseDelete => {
                self.require(self.ui.menu_open, "card menu is not open")?;
                self.ui.menu_open = false;
                self.ui.delete_prompt = true;
            }
            SurfaceCommand::ConfirmDelete => {
                self.require(self.ui.delete_prompt, "delete prompt is not open")?;
                let location = self.open_card()?;
                self.columns[location.column_index].cards.remove(location.position);
                self.ui = UiState::default();
            }
            SurfaceCommand::CancelDelete => {
                self.require(self.ui.delete_prompt, "delete prompt is not open")?;
                self.ui.delete_prompt = false;
            }
            SurfaceCommand::Submit => {
                self.require(self.ui.editing, "edit form is not open")?;
                self.ui = UiState::default();
            }
        }
        Ok(())
    }

    fn require(&self, condition: bool, message: &str) -> Result<()> {
        if condition { Ok(()) } else { Err(KanbanError::Surface(message.to_string())) }
    }
}

/// A [`RenderingSurface`] backed by plain data.
#[derive(Debug)]
pub struct InMemorySurface {
    state: RwLock<BoardState>,
}

impl InMemorySurface {
    pub fn builder() -> InMemorySurfaceBuilder {
        InMemorySurfaceBuilder::default()
    }

    /// Three-column demo board with a mix of finished and open cards.
    pub fn sample() -> Self {
        Self::builder()
            .column("TODO", |c| {
                c.card("Build UI for onboarding flow", &[false, false, false])
                    .card("Add search endpoints", &[true, false])
            })
            .column("DOING", |c| {
                c.card("Design settings and search pages", &[true, false, false])
                    .card("Add account management endpoints", &[true, true, false])
                    .card("Research pricing points", &[true, true])
            })
            .column("DONE", |c| {
                c.card("Conduct 5 wireframe tests", &[true])
                    .card("Review results of usability tests", &[true, true, false])
            })
            .build()
    }

    /// Title of the card whose detail view is open.
    pub async fn open_card(&self) -> Option<String> {
        self.state.read().await.ui.open_card.clone()
    }
}

#[async_trait]
impl RenderingSurface for InMemorySurface {
    async fn list_columns(&self) -> Result<Vec<ColumnHeader>> {
        let state = self.state.read().await;
        Ok(state
            .columns
            .iter()
            .map(|c| ColumnHeader {
                header_text: format!("{} ({})", c.name, c.cards.len()),
                card_count: c.cards.len(),
            })
            .collect())
    }

    async fn list_cards(&self, column_index: usize) -> Result<Vec<CardText>> {
        let state = self.state.read().await;
        let column = state
            .columns
            .get(column_index)
            .ok_or_else(|| KanbanError::not_found("column", format!("#{}", column_index)))?;
        Ok(column
            .cards
            .iter()
            .map(|card| CardText {
                title_text: card.title.clone(),
                subtask_label: card.tile_label(),
            })
            .collect())
    }

    async fn find_card(&self, name: &str) -> Result<Option<CardLocation>> {
        self.state.read().await.locate(name)
    }

    async fn command(&self, command: SurfaceCommand) -> Result<()> {
        tracing::trace!(command = %command, "in-memory surface command");
        self.state.write().await.apply(command)
    }

    async fn read_subtask_label_near(&self, card_name: &str) -> Result<String> {
        let state = self.state.read().await;
        let location = state
            .open_card_named(card_name)
            .map_err(|e| match e {
                KanbanError::NotFound { .. } => KanbanError::not_found("subtask label", card_name),
                other => other,
            })?;
        Ok(state.card(location).dialog_label())
    }

    async fn subtask_rows(&self, card_name: &str) -> Result<Vec<SubtaskRow>> {
        let state = self.state.read().await;
        let location = state.open_card_named(card_name)?;
        Ok(state.rows(location))
    }

    async fn visible_subtask_rows(&self) -> Result<Vec<SubtaskRow>> {
        let state = self.state.read().await;
        if state.ui.open_card.is_none() {
            return Ok(Vec::new());
        }
        let location = state.open_card()?;
        Ok(state.rows(location))
    }
}

/// Builder for [`InMemorySurface`].
#[derive(Debug)]
pub struct InMemorySurfaceBuilder {
    columns: Vec<MemColumn>,
    strike_completed: bool,
}

impl Default for InMemorySurfaceBuilder {
    fn default() -> Self {
        Self { columns: Vec::new(), strike_completed: true }
    }
}

impl InMemorySurfaceBuilder {
    /// Append a column and fill it with `cards`.
    pub fn column(
        mut self,
        name: impl Into<String>,
        cards: impl FnOnce(ColumnBuilder) -> ColumnBuilder,
    ) -> Self {
        let built = cards(ColumnBuilder::default());
        self.columns.push(MemColumn { name: name.into(), cards: built.cards });
        self
    }

    /// Whether checked subtasks render struck through. Defaults to `true`.
    pub fn strike_completed(mut self, strike: bool) -> Self {
        self.strike_completed = strike;
        self
    }

    pub fn build(self) -> InMemorySurface {
        InMemorySurface {
            state: RwLock::new(BoardState {
                columns: self.columns,
                ui: UiState::default(),
                strike_completed: self.strike_completed,
            }),
        }
    }
}

/// Cards of one column under construction.
#[derive(Debug, Default)]
pub struct ColumnBuilder {
    cards: Vec<MemCard>,
}

impl ColumnBuilder {
    /// Add a card whose subtasks are done according to `subtasks`.
    pub fn card(mut self, title: impl Into<String>, subtasks: &[bool]) -> Self {
        let subtasks = subtasks
            .iter()
            .enumerate()
            .map(|(i, done)| MemSubtask { title: format!("Subtask {}", i + 1), done: *done })
            .collect();
        self.cards.push(MemCard { title: title.into(), subtasks, label: None });
        self
    }

    /// Add a card that renders `label` verbatim as its progress text.
    pub fn card_with_label(mut self, title: impl Into<String>, label: impl Into<String>) -> Self {
        self.cards.push(MemCard {
            title: title.into(),
            subtasks: Vec::new(),
            label: Some(label.into()),
        });
        self
    }
}
