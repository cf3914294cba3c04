//! Editor mount configuration.
//!
//! Everything a host knows about an editor mount is collected here once and
//! handed to [`crate::session::EditSession::new`]. Nothing in this module is
//! mutated after the session is built.

/// Item count used when neither the snippet nor the editor names one.
pub const DEFAULT_ITEM_COUNT: usize = 3;

/// Structure notation used in free mode when the first snippet has none.
pub const DEFAULT_STRUCTURE: &str = "[3]";

/// Snippet name used in snippet mode when the source has no name.
pub const UNTITLED_SNIPPET: &str = "Untitled";

/// Snippet name used in free mode when the source has no name.
pub const MAIN_SNIPPET: &str = "main";

/// Class carried by every editor mount on the host page; scoped stylesheets
/// are prefixed with it.
pub const SCOPE_CLASS: &str = "fg-editor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Fixed-slot editing: snippet list, add/remove item buttons, inline styling.
    #[default]
    Snippet,
    /// Freeform editing: text-area CSS, structure editing, scoped stylesheet.
    Free,
}

#[derive(Debug, Clone, Default)]
pub struct EditorConfig {
    pub mode: Mode,
    pub default_item_count: Option<usize>,
    pub title: String,
}

impl EditorConfig {
    pub fn new(mode: Mode) -> Self {
        EditorConfig {
            mode,
            ..Default::default()
        }
    }

    pub fn with_default_item_count(mut self, count: usize) -> Self {
        self.default_item_count = Some(count);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Name shown for a snippet whose source carries none.
    pub fn fallback_snippet_name(&self) -> &'static str {
        match self.mode {
            Mode::Snippet => UNTITLED_SNIPPET,
            Mode::Free => MAIN_SNIPPET,
        }
    }
}

/// One embedded code block of an editor mount.
#[derive(Debug, Clone, Default)]
pub struct SnippetSource {
    pub name: Option<String>,
    pub css: String,
    pub structure: Option<String>,
    pub item_count: Option<usize>,
}

impl SnippetSource {
    pub fn new(css: impl Into<String>) -> Self {
        SnippetSource {
            css: css.into(),
            ..Default::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_structure(mut self, structure: impl Into<String>) -> Self {
        self.structure = Some(structure.into());
        self
    }

    pub fn with_item_count(mut self, count: usize) -> Self {
        self.item_count = Some(count);
        self
    }
}

/// Everything needed to mount one editor.
#[derive(Debug, Clone, Default)]
pub struct MountConfig {
    pub config: EditorConfig,
    pub snippets: Vec<SnippetSource>,
}

impl MountConfig {
    pub fn new(config: EditorConfig, snippets: Vec<SnippetSource>) -> Self {
        MountConfig { config, snippets }
    }
}
