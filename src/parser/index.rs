//! Identifier lookup and page grouping over raw blocks.

use std::collections::HashMap;

use super::block::{Block, BlockType, Response};

/// Immutable view over the blocks of one or more responses.
///
/// Built once per parse and borrowed by every builder. Lookups that miss
/// return `None`; callers treat a missing block as absent.
#[derive(Debug)]
pub struct BlockIndex<'a> {
    blocks: HashMap<&'a str, &'a Block>,
    pages: Vec<Vec<&'a Block>>,
}

impl<'a> BlockIndex<'a> {
    /// Index every block and split the block sequence into pages.
    ///
    /// A new page starts at each PAGE block and runs until the next one,
    /// across response boundaries. Blocks seen before the first PAGE block
    /// form a page of their own. On identifier collisions the later block
    /// wins the lookup.
    pub fn build(responses: &'a [Response]) -> Self {
        let mut blocks = HashMap::new();
        let mut pages = Vec::new();
        let mut current: Vec<&'a Block> = Vec::new();

        for block in responses.iter().flat_map(|r| &r.blocks) {
            blocks.insert(block.id.as_str(), block);

            if block.block_type == BlockType::Page && !current.is_empty() {
                pages.push(std::mem::take(&mut current));
            }
            current.push(block);
        }
        if !current.is_empty() {
            pages.push(current);
        }

        log::debug!(
            "Indexed {} blocks into {} page group(s)",
            blocks.len(),
            pages.len()
        );

        Self { blocks, pages }
    }

    /// Look up a block by identifier.
    pub fn get(&self, id: &str) -> Option<&'a Block> {
        let found = self.blocks.get(id).copied();
        if found.is_none() {
            log::trace!("Block {} is referenced but not present", id);
        }
        found
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if no blocks were indexed.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Per-page block groups in source order.
    pub fn page_groups(&self) -> &[Vec<&'a Block>] {
        &self.pages
    }

    /// Resolve identifiers, keeping blocks whose kind is in `kinds`.
    ///
    /// Order follows `ids`; unknown identifiers are skipped.
    pub fn resolve<'s, I>(&'s self, ids: I, kinds: &'s [BlockType]) -> impl Iterator<Item = &'a Block> + 's
    where
        I: IntoIterator<Item = &'s str>,
        I::IntoIter: 's,
    {
        ids.into_iter()
            .filter_map(move |id| self.get(id))
            .filter(move |block| kinds.contains(&block.block_type))
    }

    /// Resolve the CHILD relationships of `block`, keeping kinds in `kinds`.
    pub fn children<'s>(
        &'s self,
        block: &'s Block,
        kinds: &'s [BlockType],
    ) -> impl Iterator<Item = &'a Block> + 's {
        self.resolve(block.child_ids(), kinds)
    }
}
