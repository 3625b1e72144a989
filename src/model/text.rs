//! Text-level types: words, selection marks and lines.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Geometry;

/// A word detected on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Source block identifier
    pub id: String,

    /// Recognized text
    pub text: String,

    /// Recognition confidence (0-100)
    pub confidence: Option<f64>,

    /// Location on the page
    pub geometry: Geometry,
}

impl Word {
    /// Create a word with the given text and an empty geometry.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            confidence: None,
            geometry: Geometry::default(),
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// State of a check box or option button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    Selected,
    NotSelected,
}

impl SelectionStatus {
    /// Literal status string, as it appears in derived text.
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStatus::Selected => "SELECTED",
            SelectionStatus::NotSelected => "NOT_SELECTED",
        }
    }

    /// Check if the element is selected.
    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionStatus::Selected)
    }
}

impl fmt::Display for SelectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A check box or option button detected on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionElement {
    /// Source block identifier
    pub id: String,

    /// Whether the mark is selected
    pub status: SelectionStatus,

    /// Recognition confidence (0-100)
    pub confidence: Option<f64>,

    /// Location on the page
    pub geometry: Geometry,
}

impl SelectionElement {
    /// Create a selection element with an empty geometry.
    pub fn new(id: impl Into<String>, status: SelectionStatus) -> Self {
        Self {
            id: id.into(),
            status,
            confidence: None,
            geometry: Geometry::default(),
        }
    }
}

/// Mixed content of a field value or a table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Word(Word),
    Selection(SelectionElement),
}

impl ContentItem {
    /// Text this item contributes: the word text, or the selection status.
    pub fn text(&self) -> &str {
        match self {
            ContentItem::Word(word) => &word.text,
            ContentItem::Selection(selection) => selection.status.as_str(),
        }
    }

    /// Check if this item is a word.
    pub fn is_word(&self) -> bool {
        matches!(self, ContentItem::Word(_))
    }

    /// Check if this item is a selection element.
    pub fn is_selection(&self) -> bool {
        matches!(self, ContentItem::Selection(_))
    }
}

/// A line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Source block identifier
    pub id: String,

    /// Line text exactly as reported by the source
    pub text: String,

    /// Recognition confidence (0-100)
    pub confidence: Option<f64>,

    /// Location on the page
    pub geometry: Geometry,

    /// Words in reading order
    pub words: Vec<Word>,
}

impl Line {
    /// Create a line with text and words.
    pub fn new(id: impl Into<String>, text: impl Into<String>, words: Vec<Word>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            confidence: None,
            geometry: Geometry::default(),
            words,
        }
    }

    /// Number of words in the line.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Line")?;
        writeln!(f, "==========")?;
        writeln!(f, "{}", self.text)?;
        writeln!(f, "Words")?;
        writeln!(f, "----------")?;
        for word in &self.words {
            write!(f, "[{}]", word)?;
        }
        Ok(())
    }
}
