//! Page assembly: one ordered pass over a page's blocks.

use crate::error::Result;
use crate::model::{Geometry, Page};

use super::block::{Block, BlockType};
use super::builder::{build_field, build_line};
use super::index::BlockIndex;
use super::options::ErrorMode;
use super::table_builder::TableBuilder;

/// Turns a page's block group into a [`Page`].
pub struct PageAssembler<'i, 'a> {
    index: &'i BlockIndex<'a>,
    tables: TableBuilder<'i, 'a>,
}

impl<'i, 'a> PageAssembler<'i, 'a> {
    /// Create an assembler over the given index.
    pub fn new(index: &'i BlockIndex<'a>, error_mode: ErrorMode) -> Self {
        Self {
            index,
            tables: TableBuilder::new(index, error_mode),
        }
    }

    /// Assemble one page from its blocks, in source order.
    ///
    /// Only LINE, TABLE and KEY-role KEY_VALUE_SET blocks become page content;
    /// every other kind is reached through relationships, if at all.
    pub fn assemble(&self, group: &[&'a Block]) -> Result<Page> {
        let mut page = Page::new();

        for &block in group {
            match &block.block_type {
                BlockType::Page => {
                    page.id = Some(block.id.clone());
                    page.geometry = Some(Geometry::from(&block.geometry));
                }
                BlockType::Line => page.add_line(build_line(block, self.index)),
                BlockType::Table => page.add_table(self.tables.build(block)?),
                BlockType::KeyValueSet => {
                    if block.is_key() {
                        if let Some(field) = build_field(block, self.index) {
                            page.add_field(field);
                        }
                    }
                }
                BlockType::Word | BlockType::Cell | BlockType::SelectionElement => {}
                BlockType::Other(kind) => {
                    log::trace!("Ignoring {} block {}", kind, block.id);
                }
            }
        }

        page.blocks = group.iter().map(|&b| b.clone()).collect();

        log::debug!(
            "Assembled page {}: {} line(s), {} field(s), {} table(s)",
            page.id.as_deref().unwrap_or("<none>"),
            page.lines.len(),
            page.form.len(),
            page.tables.len()
        );

        Ok(page)
    }
}
