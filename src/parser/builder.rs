//! Entity builders for words, selection marks, lines and form fields.

use crate::model::{ContentItem, Field, FieldKey, FieldValue, Geometry, Line, SelectionElement, Word};

use super::block::{Block, BlockType};
use super::index::BlockIndex;

pub(crate) const WORDS: &[BlockType] = &[BlockType::Word];
pub(crate) const WORDS_AND_MARKS: &[BlockType] = &[BlockType::Word, BlockType::SelectionElement];

/// Build a word from a WORD block.
pub fn build_word(block: &Block) -> Word {
    Word {
        id: block.id.clone(),
        text: block.text().to_string(),
        confidence: block.confidence,
        geometry: Geometry::from(&block.geometry),
    }
}

/// Build a selection element from a SELECTION_ELEMENT block.
///
/// Returns `None` when the block carries no selection status.
pub fn build_selection(block: &Block) -> Option<SelectionElement> {
    let Some(status) = block.selection_status else {
        log::warn!(
            "Selection element {} has no selection status; skipping it",
            block.id
        );
        return None;
    };

    Some(SelectionElement {
        id: block.id.clone(),
        status,
        confidence: block.confidence,
        geometry: Geometry::from(&block.geometry),
    })
}

/// Build the mixed content of a value or cell from its CHILD relationships.
pub fn build_content(block: &Block, index: &BlockIndex<'_>) -> Vec<ContentItem> {
    index
        .children(block, WORDS_AND_MARKS)
        .filter_map(|child| match child.block_type {
            BlockType::Word => Some(ContentItem::Word(build_word(child))),
            BlockType::SelectionElement => build_selection(child).map(ContentItem::Selection),
            _ => None,
        })
        .collect()
}

/// Build the words referenced by the CHILD relationships of `block`.
pub fn build_words(block: &Block, index: &BlockIndex<'_>) -> Vec<Word> {
    index.children(block, WORDS).map(build_word).collect()
}

/// Build a line from a LINE block.
///
/// The line text is taken from the block as-is; it is not rebuilt from the
/// words.
pub fn build_line(block: &Block, index: &BlockIndex<'_>) -> Line {
    Line {
        id: block.id.clone(),
        text: block.text().to_string(),
        confidence: block.confidence,
        geometry: Geometry::from(&block.geometry),
        words: build_words(block, index),
    }
}

/// Build a form field from a KEY-role KEY_VALUE_SET block.
///
/// Returns `None` when the key resolves to no words; such a field cannot be
/// looked up and is dropped with a warning.
pub fn build_field(block: &Block, index: &BlockIndex<'_>) -> Option<Field> {
    let key = FieldKey::new(block.id.clone(), build_words(block, index))
        .located(block.confidence, Geometry::from(&block.geometry));

    if key.is_empty() {
        log::warn!(
            "Key {} has no words; excluding the field from output",
            block.id
        );
        return None;
    }

    let value = block
        .value_ids()
        .filter_map(|id| index.get(id))
        .find(|candidate| candidate.is_value())
        .map(|value_block| {
            FieldValue::new(value_block.id.clone(), build_content(value_block, index))
                .located(value_block.confidence, Geometry::from(&value_block.geometry))
        });

    if value.is_none() {
        log::debug!("Key {} ({:?}) has no linked value", block.id, key.text);
    }

    Some(Field::new(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SelectionStatus;
    use crate::parser::{EntityType, RawGeometry, Relationship, Response};

    fn word(id: &str, text: &str) -> Block {
        let mut b = Block::new(id, BlockType::Word, RawGeometry::default());
        b.text = Some(text.to_string());
        b
    }

    fn mark(id: &str, status: Option<SelectionStatus>) -> Block {
        let mut b = Block::new(id, BlockType::SelectionElement, RawGeometry::default());
        b.selection_status = status;
        b
    }

    fn kv(id: &str, role: EntityType, relationships: Vec<Relationship>) -> Block {
        let mut b = Block::new(id, BlockType::KeyValueSet, RawGeometry::default());
        b.entity_types = Some(vec![role]);
        b.relationships = Some(relationships);
        b
    }

    #[test]
    fn test_line_text_is_verbatim() {
        let mut line = Block::new("l1", BlockType::Line, RawGeometry::default());
        line.text = Some("Hello,  world".to_string());
        line.relationships = Some(vec![Relationship::child(["w1", "w2"])]);
        let responses = vec![Response::new(vec![
            line,
            word("w1", "Hello,"),
            word("w2", "world"),
        ])];
        let index = BlockIndex::build(&responses);

        let line = build_line(index.get("l1").unwrap(), &index);
        assert_eq!(line.text, "Hello,  world");
        assert_eq!(line.words.len(), 2);
        assert_eq!(line.words[1].text, "world");
    }

    #[test]
    fn test_field_with_value() {
        let responses = vec![Response::new(vec![
            kv(
                "k",
                EntityType::Key,
                vec![Relationship::value(["v"]), Relationship::child(["w1", "w2"])],
            ),
            kv("v", EntityType::Value, vec![Relationship::child(["w3"])]),
            word("w1", "First"),
            word("w2", "Name"),
            word("w3", "Jane"),
        ])];
        let index = BlockIndex::build(&responses);

        let field = build_field(index.get("k").unwrap(), &index).unwrap();
        assert_eq!(field.key_text(), "First Name");
        assert_eq!(field.value_text(), "Jane");
        assert_eq!(field.value.unwrap().id, "v");
    }

    #[test]
    fn test_field_value_with_selection() {
        let responses = vec![Response::new(vec![
            kv(
                "k",
                EntityType::Key,
                vec![Relationship::child(["w1"]), Relationship::value(["v"])],
            ),
            kv("v", EntityType::Value, vec![Relationship::child(["s1"])]),
            word("w1", "Married"),
            mark("s1", Some(SelectionStatus::Selected)),
        ])];
        let index = BlockIndex::build(&responses);

        let field = build_field(index.get("k").unwrap(), &index).unwrap();
        assert_eq!(field.value_text(), "SELECTED");
    }

    #[test]
    fn test_field_without_key_words_is_dropped() {
        let responses = vec![Response::new(vec![
            kv("k", EntityType::Key, vec![Relationship::value(["v"])]),
            kv("v", EntityType::Value, vec![Relationship::child(["w1"])]),
            word("w1", "orphan"),
        ])];
        let index = BlockIndex::build(&responses);

        assert!(build_field(index.get("k").unwrap(), &index).is_none());
    }

    #[test]
    fn test_value_link_must_be_value_role() {
        let responses = vec![Response::new(vec![
            kv(
                "k",
                EntityType::Key,
                vec![Relationship::child(["w1"]), Relationship::value(["k2", "missing"])],
            ),
            kv("k2", EntityType::Key, vec![Relationship::child(["w1"])]),
            word("w1", "Name"),
        ])];
        let index = BlockIndex::build(&responses);

        let field = build_field(index.get("k").unwrap(), &index).unwrap();
        assert!(field.value.is_none());
        assert_eq!(field.value_text(), "");
    }

    #[test]
    fn test_value_without_children_is_empty() {
        let responses = vec![Response::new(vec![
            kv(
                "k",
                EntityType::Key,
                vec![Relationship::child(["w1"]), Relationship::value(["v"])],
            ),
            kv("v", EntityType::Value, Vec::new()),
            word("w1", "Signature"),
        ])];
        let index = BlockIndex::build(&responses);

        let field = build_field(index.get("k").unwrap(), &index).unwrap();
        let value = field.value.unwrap();
        assert!(value.content.is_empty());
        assert_eq!(value.text, "");
    }

    #[test]
    fn test_selection_without_status_is_skipped() {
        let mut cell = Block::new("c", BlockType::Cell, RawGeometry::default());
        cell.relationships = Some(vec![Relationship::child(["s1", "s2"])]);
        let responses = vec![Response::new(vec![
            cell,
            mark("s1", None),
            mark("s2", Some(SelectionStatus::NotSelected)),
        ])];
        let index = BlockIndex::build(&responses);

        let content = build_content(index.get("c").unwrap(), &index);
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].text(), "NOT_SELECTED");
    }
}
