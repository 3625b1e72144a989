//! Table reconstruction from TABLE and CELL blocks.
//!
//! Cells are taken in the order the TABLE block lists them and grouped into
//! rows by their row index. The source lists cells row-major, left to right;
//! input that breaks this order is rejected in strict mode and kept as-is in
//! lenient mode.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::{Cell, Geometry, Row, Table};

use super::block::{Block, BlockType};
use super::builder::build_content;
use super::index::BlockIndex;
use super::options::ErrorMode;

const CELLS: &[BlockType] = &[BlockType::Cell];

/// Builds tables out of TABLE blocks.
#[derive(Debug, Clone, Copy)]
pub struct TableBuilder<'i, 'a> {
    index: &'i BlockIndex<'a>,
    error_mode: ErrorMode,
}

impl<'i, 'a> TableBuilder<'i, 'a> {
    /// Create a table builder over the given index.
    pub fn new(index: &'i BlockIndex<'a>, error_mode: ErrorMode) -> Self {
        Self { index, error_mode }
    }

    /// Build a table from a TABLE block.
    pub fn build(&self, block: &Block) -> Result<Table> {
        let mut table = Table {
            id: block.id.clone(),
            rows: Vec::new(),
            confidence: block.confidence,
            geometry: Geometry::from(&block.geometry),
        };

        let mut current_row = 1;
        let mut row = Row::default();
        let mut seen = HashSet::new();

        for cell_block in self.index.children(block, CELLS) {
            let cell = self.build_cell(&table.id, cell_block, current_row)?;

            if cell.row_index < current_row {
                self.out_of_order(
                    &table.id,
                    format!(
                        "cell {} is in row {} after row {}",
                        cell.id, cell.row_index, current_row
                    ),
                )?;
            }
            if !seen.insert((cell.row_index, cell.column_index)) {
                self.out_of_order(
                    &table.id,
                    format!(
                        "cell {} repeats position ({}, {})",
                        cell.id, cell.row_index, cell.column_index
                    ),
                )?;
            }

            if cell.row_index > current_row {
                table.add_row(std::mem::take(&mut row));
                current_row = cell.row_index;
            }
            row.cells.push(cell);
        }

        if !row.is_empty() {
            table.add_row(row);
        }

        log::debug!(
            "Built table {} with {} row(s), {} column(s)",
            table.id,
            table.row_count(),
            table.column_count()
        );

        Ok(table)
    }

    /// Build a cell; `current_row` stands in for a missing row index in lenient mode.
    fn build_cell(&self, table_id: &str, block: &Block, current_row: u32) -> Result<Cell> {
        let row_index = match block.row_index {
            Some(row_index) => row_index,
            None => {
                self.out_of_order(table_id, format!("cell {} has no row index", block.id))?;
                current_row
            }
        };

        let cell = Cell::new(
            block.id.clone(),
            row_index,
            block.column_index.unwrap_or_default(),
            build_content(block, self.index),
        )
        .spanning(block.row_span.unwrap_or(1), block.column_span.unwrap_or(1))
        .located(block.confidence, Geometry::from(&block.geometry));

        Ok(cell)
    }

    fn out_of_order(&self, table_id: &str, problem: String) -> Result<()> {
        match self.error_mode {
            ErrorMode::Strict => Err(Error::TableLayout(format!("table {}: {}", table_id, problem))),
            ErrorMode::Lenient => {
                log::warn!("Table {}: {}; keeping the cell in the open row", table_id, problem);
                Ok(())
            }
        }
    }
}
