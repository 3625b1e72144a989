//! JSON rendering.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Document, Page};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert a document model to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Serialize the raw blocks a page was built from.
pub fn blocks_to_json(page: &Page, format: JsonFormat) -> Result<String> {
    serialize(&page.blocks, format)
}

/// Serialize the raw responses a document was built from.
///
/// A single response is written as an object, several as an array.
pub fn responses_to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    match doc.responses.as_slice() {
        [single] => serialize(single, format),
        many => serialize(many, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Line;
    use crate::parser::{Block, BlockType, RawGeometry, Response};

    fn sample() -> Document {
        let mut doc = Document::new();
        let mut page = Page::new();
        page.add_line(Line::new("l1", "Hello", Vec::new()));
        page.blocks = vec![Block::new("l1", BlockType::Line, RawGeometry::default())];
        doc.add_page(page);
        doc.responses = vec![Response::new(doc.pages[0].blocks.clone())];
        doc
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"text\""));
        assert!(json.contains("Hello"));
        assert!(json.contains('\n'));
        assert!(!json.contains("BlockType"));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_blocks_to_json() {
        let json = blocks_to_json(&sample().pages[0], JsonFormat::Compact).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains(r#""BlockType":"LINE""#));
    }

    #[test]
    fn test_responses_to_json_shape() {
        let mut doc = sample();
        let json = responses_to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(json.starts_with('{'));

        doc.responses.push(Response::new(Vec::new()));
        let json = responses_to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(json.starts_with('['));
    }
}
