//! Table types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ContentItem, Geometry};

/// A table structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Source block identifier
    pub id: String,

    /// Rows in the table
    pub rows: Vec<Row>,

    pub confidence: Option<f64>,

    pub geometry: Geometry,
}

impl Table {
    /// Create a new empty table.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell texts, row by row.
    pub fn to_matrix(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.text.clone()).collect())
            .collect()
    }

    /// Check if any cell spans more than one row or column.
    pub fn has_merged_cells(&self) -> bool {
        self.rows.iter().flat_map(|r| &r.cells).any(Cell::is_merged)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table")?;
        writeln!(f, "==========")?;
        for row in &self.rows {
            writeln!(f, "Row")?;
            writeln!(f, "==========")?;
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Cells in traversal order
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a new row with cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "[{}]", cell.text)?;
        }
        Ok(())
    }
}

/// A table cell.
///
/// Spans are recorded on the anchor cell only; spanned positions do not get
/// copies of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Source block identifier
    pub id: String,

    /// Row index (1-indexed)
    pub row_index: u32,

    /// Column index (1-indexed)
    pub column_index: u32,

    /// Number of rows this cell spans
    pub row_span: u32,

    /// Number of columns this cell spans
    pub column_span: u32,

    /// Words and selection marks, in reading order
    pub content: Vec<ContentItem>,

    /// Derived text
    pub text: String,

    pub confidence: Option<f64>,

    pub geometry: Geometry,
}

impl Cell {
    /// Create a 1x1 cell at the given position; the text is derived from the content.
    pub fn new(
        id: impl Into<String>,
        row_index: u32,
        column_index: u32,
        content: Vec<ContentItem>,
    ) -> Self {
        let text = cell_text(&content);
        Self {
            id: id.into(),
            row_index,
            column_index,
            row_span: 1,
            column_span: 1,
            content,
            text,
            confidence: None,
            geometry: Geometry::default(),
        }
    }

    /// Set spans and return self.
    pub fn spanning(mut self, row_span: u32, column_span: u32) -> Self {
        self.row_span = row_span;
        self.column_span = column_span;
        self
    }

    /// Set confidence and geometry and return self.
    pub fn located(mut self, confidence: Option<f64>, geometry: Geometry) -> Self {
        self.confidence = confidence;
        self.geometry = geometry;
        self
    }

    /// Check if the cell has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.column_span > 1
    }
}

/// Content text in content order. A word is separated from what follows it
/// by a space, a selection status by ", ". No trailing separator.
fn cell_text(content: &[ContentItem]) -> String {
    let mut text = String::new();
    let mut separator = "";
    for item in content {
        text.push_str(separator);
        match item {
            ContentItem::Word(w) => {
                text.push_str(&w.text);
                separator = " ";
            }
            ContentItem::Selection(s) => {
                text.push_str(s.status.as_str());
                separator = ", ";
            }
        }
    }
    text
}
