use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Structure notation contained something other than digits and brackets.
    #[error("malformed structure notation: unexpected {found:?} at position {position}")]
    MalformedStructure { found: char, position: usize },

    /// A digit run asked for more than `MAX_ITEM_RUN` items.
    #[error("item run starting at position {position} is too large")]
    ItemRunOverflow { position: usize },

    /// Value choices were requested for a property outside the known table.
    #[error("unknown property `{0}`")]
    UnknownProperty(String),

    #[error("editor mount has no snippets")]
    NoSnippets,

    #[error("layout failed: {0}")]
    Layout(String),
}

impl EditorError {
    pub fn malformed_structure(found: char, position: usize) -> Self {
        Self::MalformedStructure { found, position }
    }

    pub fn unknown_property(name: impl Into<String>) -> Self {
        Self::UnknownProperty(name.into())
    }
}
