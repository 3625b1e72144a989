//! Response parsing module.
//!
//! Decodes raw analysis responses, indexes their blocks and assembles the
//! document model one page at a time.

mod block;
mod builder;
mod index;
mod options;
mod page_assembler;
mod response_parser;
mod table_builder;

pub use block::{
    Block, BlockType, DocumentMetadata, EntityType, RawBoundingBox, RawGeometry, RawPoint,
    Relationship, RelationshipType, Response,
};
pub use builder::{build_content, build_field, build_line, build_selection, build_word, build_words};
pub use index::BlockIndex;
pub use options::{ErrorMode, ParseOptions};
pub use page_assembler::PageAssembler;
pub use response_parser::ResponseParser;
pub use table_builder::TableBuilder;
