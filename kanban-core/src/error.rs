#[derive(Debug, thiserror::Error)]
pub enum KanbanError {
    /// An expected column, card or element is not on the rendering surface.
    #[error("{what} not found: {name}")]
    NotFound { what: String, name: String },

    /// A subtask label did not contain two numeric tokens.
    #[error("unparsable subtask label on card '{card}': {raw:?}")]
    Unparsable { card: String, raw: String },

    /// A scenario's setup assumption does not hold.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("board has no columns")]
    EmptyBoard,

    #[error("card name is not unique on the board: {name}")]
    DuplicateCard { name: String },

    #[error("column name is not unique on the board: {name}")]
    DuplicateColumn { name: String },

    /// A reconciliation check observed a state it did not expect.
    #[error("check '{check}' failed: {detail}")]
    CheckFailed { check: String, detail: String },

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KanbanError {
    pub fn not_found(what: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound { what: what.into(), name: name.into() }
    }

    pub fn check_failed(check: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::CheckFailed { check: check.into(), detail: detail.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, KanbanError>;
