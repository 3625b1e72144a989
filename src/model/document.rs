//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{ContentItem, Page};
use crate::parser::Response;

/// A document rebuilt from one or more analysis responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in the document
    pub pages: Vec<Page>,

    /// Responses the document was built from
    #[serde(skip)]
    pub responses: Vec<Response>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Full text of every page, concatenated.
    pub fn plain_text(&self) -> String {
        self.pages.iter().map(|page| page.plain_text()).collect()
    }

    /// Count the entities in the document.
    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats {
            page_count: self.page_count(),
            ..Default::default()
        };

        for page in &self.pages {
            stats.block_count += page.blocks.len();
            stats.line_count += page.lines.len();
            stats.word_count += page.lines.iter().map(|l| l.words.len()).sum::<usize>();
            stats.field_count += page.form.len();
            stats.table_count += page.tables.len();

            let cells = page.tables.iter().flat_map(|t| &t.rows).flat_map(|r| &r.cells);
            let field_values = page.form.fields().iter().filter_map(|f| f.value.as_ref());
            for cell in cells {
                stats.cell_count += 1;
                stats.selection_count += count_selections(&cell.content);
            }
            for value in field_values {
                stats.selection_count += count_selections(&value.content);
            }
        }

        stats
    }
}

fn count_selections(content: &[ContentItem]) -> usize {
    content.iter().filter(|c| c.is_selection()).count()
}

/// Entity counts for a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub page_count: u32,

    /// Raw blocks across all pages
    pub block_count: usize,

    pub line_count: usize,

    /// Words belonging to lines
    pub word_count: usize,

    pub field_count: usize,

    pub table_count: usize,

    pub cell_count: usize,

    /// Selection marks inside field values and cells
    pub selection_count: usize,
}
