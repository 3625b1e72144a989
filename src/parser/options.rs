//! Parsing options and configuration.

use crate::render::PageSelection;

/// Options for rebuilding documents from responses.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// How to treat table cells that break row-major order
    pub error_mode: ErrorMode,

    /// Page selection (which page groups to assemble)
    pub pages: PageSelection,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (keep out-of-order table cells, log a warning).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail when table cells cannot be grouped into rows
    #[default]
    Strict,
    /// Group cells best-effort and continue
    Lenient,
}
