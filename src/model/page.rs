//! Page-level types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Field, Form, Geometry, Line, Table};
use crate::parser::Block;

/// A single page in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// PAGE block identifier (absent when the source had no PAGE block)
    pub id: Option<String>,

    /// PAGE block geometry
    pub geometry: Option<Geometry>,

    /// Lines in source order
    pub lines: Vec<Line>,

    /// Key/value fields
    pub form: Form,

    /// Tables in source order
    pub tables: Vec<Table>,

    /// Order in which lines, tables and fields appeared in the source
    pub content: Vec<Content>,

    /// Every line's text followed by a newline
    pub text: String,

    /// Raw blocks this page was built from
    #[serde(skip)]
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create a new empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line; it is appended to the full text as well.
    pub fn add_line(&mut self, line: Line) {
        self.text.push_str(&line.text);
        self.text.push('\n');
        self.content.push(Content::Line(self.lines.len()));
        self.lines.push(line);
    }

    /// Add a table to the page.
    pub fn add_table(&mut self, table: Table) {
        self.content.push(Content::Table(self.tables.len()));
        self.tables.push(table);
    }

    /// Add a field to the page form.
    pub fn add_field(&mut self, field: Field) {
        let index = self.form.add_field(field);
        self.content.push(Content::Field(index));
    }

    /// Lines, tables and fields in source order.
    pub fn content(&self) -> impl Iterator<Item = ContentRef<'_>> {
        self.content.iter().filter_map(move |item| match *item {
            Content::Line(i) => self.lines.get(i).map(ContentRef::Line),
            Content::Table(i) => self.tables.get(i).map(ContentRef::Table),
            Content::Field(i) => self.form.field(i).map(ContentRef::Field),
        })
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> &str {
        &self.text
    }

    /// Check if the page is empty (no lines, tables or fields).
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page")?;
        writeln!(f, "==========")?;
        for item in self.content() {
            match item {
                ContentRef::Line(line) => writeln!(f, "{}", line)?,
                ContentRef::Table(table) => writeln!(f, "{}", table)?,
                ContentRef::Field(field) => writeln!(f, "{}", field)?,
            }
        }
        Ok(())
    }
}

/// Position of one top-level entity within its page collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "index", rename_all = "snake_case")]
pub enum Content {
    /// Index into `Page::lines`
    Line(usize),
    /// Index into `Page::tables`
    Table(usize),
    /// Index into the page form fields
    Field(usize),
}

/// A borrowed top-level entity.
#[derive(Debug, Clone, Copy)]
pub enum ContentRef<'a> {
    Line(&'a Line),
    Table(&'a Table),
    Field(&'a Field),
}

impl ContentRef<'_> {
    /// Check if this entity is a line.
    pub fn is_line(&self) -> bool {
        matches!(self, ContentRef::Line(_))
    }

    /// Check if this entity is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, ContentRef::Table(_))
    }

    /// Check if this entity is a field.
    pub fn is_field(&self) -> bool {
        matches!(self, ContentRef::Field(_))
    }
}
