//! Board snapshot value types.

use crate::error::{KanbanError, Result};
use crate::subtask::SubtaskInfo;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A card as rendered on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub subtasks: SubtaskInfo,
}

impl Card {
    pub fn new(name: impl Into<String>, subtasks: SubtaskInfo) -> Self {
        Self { name: name.into(), subtasks }
    }
}

/// A point-in-time snapshot: column name to cards, both in on-screen order.
///
/// Boards are never patched. Take a new snapshot after every action and
/// compare by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    columns: IndexMap<String, Vec<Card>>,
}

impl Board {
    /// Assemble a board from columns in display order.
    ///
    /// Fails with [`KanbanError::DuplicateColumn`] if two columns share a name.
    pub fn try_from_columns<I>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<Card>)>,
    {
        let mut map = IndexMap::new();
        for (name, cards) in columns {
            if map.contains_key(&name) {
                return Err(KanbanError::DuplicateColumn { name });
            }
            map.insert(name, cards);
        }
        Ok(Self { columns: map })
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of cards across all columns.
    pub fn card_count(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Cards of `name`, or `None` if the board has no such column.
    pub fn column(&self, name: &str) -> Option<&[Card]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Cards of `name`, treating a missing column as empty.
    pub fn cards_in(&self, name: &str) -> &[Card] {
        self.column(name).unwrap_or(&[])
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Card])> {
        self.columns.iter().map(|(name, cards)| (name.as_str(), cards.as_slice()))
    }

    /// Column at display position `index`.
    pub fn column_at(&self, index: usize) -> Option<(&str, &[Card])> {
        self.columns.get_index(index).map(|(name, cards)| (name.as_str(), cards.as_slice()))
    }

    /// Find the card called `name` and the column holding it.
    ///
    /// Card names are expected to be unique on a board; more than one match
    /// is reported as [`KanbanError::DuplicateCard`] rather than picking one.
    pub fn locate(&self, name: &str) -> Result<Option<(&str, &Card)>> {
        let mut matches = self
            .columns
            .iter()
            .flat_map(|(column, cards)| cards.iter().map(move |card| (column.as_str(), card)))
            .filter(|(_, card)| card.name == name);

        let first = matches.next();
        if matches.next().is_some() {
            return Err(KanbanError::DuplicateCard { name: name.to_string() });
        }
        Ok(first)
    }
}

/// A column picked out of a board by a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub column: String,
    pub cards: Vec<Card>,
    pub count: usize,
}

impl ColumnInfo {
    pub fn new(column: impl Into<String>, cards: Vec<Card>) -> Self {
        let count = cards.len();
        Self { column: column.into(), cards, count }
    }

    pub fn first_card(&self) -> Option<&Card> {
        self.cards.first()
    }
}
