//! Form types: key/value fields.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ContentItem, Geometry, Word};

/// The key side of a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldKey {
    /// Source block identifier
    pub id: String,

    /// Words of the key, in reading order
    pub words: Vec<Word>,

    /// Words joined by single spaces
    pub text: String,

    pub confidence: Option<f64>,

    pub geometry: Geometry,
}

impl FieldKey {
    /// Create a key; the text is derived from the words.
    pub fn new(id: impl Into<String>, words: Vec<Word>) -> Self {
        let text = join_text(words.iter().map(|w| w.text.as_str()));
        Self {
            id: id.into(),
            words,
            text,
            confidence: None,
            geometry: Geometry::default(),
        }
    }

    /// Set confidence and geometry and return self.
    pub fn located(mut self, confidence: Option<f64>, geometry: Geometry) -> Self {
        self.confidence = confidence;
        self.geometry = geometry;
        self
    }

    /// Check if the key has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The value side of a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    /// Source block identifier
    pub id: String,

    /// Words and selection marks, in reading order
    pub content: Vec<ContentItem>,

    /// Items joined by single spaces; selection marks contribute their status
    pub text: String,

    pub confidence: Option<f64>,

    pub geometry: Geometry,
}

impl FieldValue {
    /// Create a value; the text is derived from the content.
    pub fn new(id: impl Into<String>, content: Vec<ContentItem>) -> Self {
        let text = join_text(content.iter().map(ContentItem::text));
        Self {
            id: id.into(),
            content,
            text,
            confidence: None,
            geometry: Geometry::default(),
        }
    }

    /// Set confidence and geometry and return self.
    pub fn located(mut self, confidence: Option<f64>, geometry: Geometry) -> Self {
        self.confidence = confidence;
        self.geometry = geometry;
        self
    }
}

fn join_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}

/// A key/value pair detected on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: FieldKey,
    pub value: Option<FieldValue>,
}

impl Field {
    /// Create a field.
    pub fn new(key: FieldKey, value: Option<FieldValue>) -> Self {
        Self { key, value }
    }

    /// Key text.
    pub fn key_text(&self) -> &str {
        &self.key.text
    }

    /// Value text, or an empty string when no value was linked.
    pub fn value_text(&self) -> &str {
        self.value.as_ref().map_or("", |v| v.text.as_str())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Field")?;
        writeln!(f, "==========")?;
        writeln!(f, "Key: {}", self.key_text())?;
        write!(f, "Value: {}", self.value_text())
    }
}

/// The fields of one page.
///
/// Fields keep encounter order. Lookup by key text returns the last field
/// added with that text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Field>", into = "Vec<Field>")]
pub struct Form {
    fields: Vec<Field>,
    by_key: HashMap<String, usize>,
}

impl Form {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field and point its key text at it. Returns its position.
    pub fn add_field(&mut self, field: Field) -> usize {
        let index = self.fields.len();
        self.by_key.insert(field.key.text.clone(), index);
        self.fields.push(field);
        index
    }

    /// Fields in encounter order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field at the given position.
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Field whose key text is exactly `key`.
    pub fn get_field_by_key(&self, key: &str) -> Option<&Field> {
        self.by_key.get(key).and_then(|&i| self.fields.get(i))
    }

    /// Fields whose key text contains `query`, ignoring case, in field order.
    pub fn search_fields_by_key(&self, query: &str) -> Vec<&Field> {
        let query = query.to_lowercase();
        self.fields
            .iter()
            .filter(|f| f.key.text.to_lowercase().contains(&query))
            .collect()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<Field>> for Form {
    fn from(fields: Vec<Field>) -> Self {
        let mut form = Form::new();
        for field in fields {
            form.add_field(field);
        }
        form
    }
}

impl From<Form> for Vec<Field> {
    fn from(form: Form) -> Self {
        form.fields
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in &self.fields {
            writeln!(f, "{}", field)?;
        }
        Ok(())
    }
}
