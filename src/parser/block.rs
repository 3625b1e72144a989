//! Raw Textract response types.
//!
//! These mirror the JSON wire format of `AnalyzeDocument` and
//! `GetDocumentAnalysis` (PascalCase keys). Keys and enum values this crate
//! does not interpret are kept, so re-serializing a block or a response
//! reproduces the input.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::SelectionStatus;

/// One analysis response: a flat, ordered list of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Response {
    /// Page count reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_metadata: Option<DocumentMetadata>,

    /// Blocks in service order
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Keys not modelled here (model version, job status, next token...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Response {
    /// Create a response holding the given blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            document_metadata: None,
            blocks,
            extra: Map::new(),
        }
    }

    /// Number of pages reported in `DocumentMetadata`, if present.
    pub fn reported_pages(&self) -> Option<u32> {
        self.document_metadata.as_ref().map(|m| m.pages)
    }
}

/// Document-level metadata attached to a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadata {
    pub pages: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single recognized unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// Identifier, unique within one response
    pub id: String,

    /// Kind of block
    pub block_type: BlockType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Roles of a KEY_VALUE_SET block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_types: Option<Vec<EntityType>>,

    /// 1-indexed row of a CELL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// 1-indexed column of a CELL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_status: Option<SelectionStatus>,

    /// Location on the page
    #[serde(default)]
    pub geometry: RawGeometry,

    /// Typed edges to other blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<Relationship>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Block {
    /// Create a block with the given id, kind and geometry and nothing else.
    pub fn new(id: impl Into<String>, block_type: BlockType, geometry: RawGeometry) -> Self {
        Self {
            id: id.into(),
            block_type,
            confidence: None,
            text: None,
            entity_types: None,
            row_index: None,
            column_index: None,
            row_span: None,
            column_span: None,
            selection_status: None,
            geometry,
            relationships: None,
            extra: Map::new(),
        }
    }

    /// The block text, or an empty string when the block carries none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Check whether the block carries the given entity role.
    pub fn has_entity_type(&self, entity: &EntityType) -> bool {
        self.entity_types
            .as_deref()
            .is_some_and(|types| types.contains(entity))
    }

    /// Check if this is a KEY_VALUE_SET block anchoring a field key.
    pub fn is_key(&self) -> bool {
        self.block_type == BlockType::KeyValueSet && self.has_entity_type(&EntityType::Key)
    }

    /// Check if this is a KEY_VALUE_SET block holding a field value.
    pub fn is_value(&self) -> bool {
        self.block_type == BlockType::KeyValueSet && self.has_entity_type(&EntityType::Value)
    }

    /// Identifiers referenced by every relationship of the given kind, in order.
    pub fn related_ids<'a>(
        &'a self,
        kind: &'a RelationshipType,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.ids_where(move |k| k == kind)
    }

    /// Identifiers of structural children.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.ids_where(|k| matches!(k, RelationshipType::Child))
    }

    /// Identifiers of linked value blocks.
    pub fn value_ids(&self) -> impl Iterator<Item = &str> {
        self.ids_where(|k| matches!(k, RelationshipType::Value))
    }

    fn ids_where<'a, F>(&'a self, wanted: F) -> impl Iterator<Item = &'a str> + 'a
    where
        F: Fn(&RelationshipType) -> bool + 'a,
    {
        self.relationships
            .iter()
            .flatten()
            .filter(move |rel| wanted(&rel.kind))
            .flat_map(|rel| rel.ids.iter().map(String::as_str))
    }

    /// Check whether the block has at least one relationship of the given kind.
    pub fn has_relationship(&self, kind: &RelationshipType) -> bool {
        self.relationships
            .iter()
            .flatten()
            .any(|rel| &rel.kind == kind)
    }
}

/// Kind of a block.
///
/// Kinds the assembler does not interpret deserialize into `Other` and
/// serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Page,
    Line,
    Word,
    Table,
    Cell,
    KeyValueSet,
    SelectionElement,
    #[serde(untagged)]
    Other(String),
}

impl BlockType {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Page => "PAGE",
            BlockType::Line => "LINE",
            BlockType::Word => "WORD",
            BlockType::Table => "TABLE",
            BlockType::Cell => "CELL",
            BlockType::KeyValueSet => "KEY_VALUE_SET",
            BlockType::SelectionElement => "SELECTION_ELEMENT",
            BlockType::Other(name) => name,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role tag on a KEY_VALUE_SET block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Key,
    Value,
    #[serde(untagged)]
    Other(String),
}

/// Kind of a relationship edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    /// Structural children (words of a line, cells of a table...)
    Child,
    /// Key to value pairing
    Value,
    #[serde(untagged)]
    Other(String),
}

/// A typed, ordered reference from one block to others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    #[serde(rename = "Type")]
    pub kind: RelationshipType,

    #[serde(default)]
    pub ids: Vec<String>,
}

impl Relationship {
    /// Create a relationship of the given kind.
    pub fn new<I, S>(kind: RelationshipType, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a CHILD relationship.
    pub fn child<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RelationshipType::Child, ids)
    }

    /// Create a VALUE relationship.
    pub fn value<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RelationshipType::Value, ids)
    }
}

/// Raw geometry as emitted by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawGeometry {
    #[serde(default)]
    pub bounding_box: RawBoundingBox,

    #[serde(default)]
    pub polygon: Vec<RawPoint>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Axis-aligned box, in page-relative coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawBoundingBox {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

/// One polygon vertex, in page-relative coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
}
