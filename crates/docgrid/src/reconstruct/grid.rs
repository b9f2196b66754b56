//! Dense grid construction from resolved cells.
//!
//! The analysis backend numbers cells from 1 and makes no ordering or
//! completeness guarantees: indices arrive unordered, positions may be
//! missing (merged regions, detection gaps), and duplicates can occur. The
//! builder renormalizes to 0-based indices, infers dimensions from the
//! maxima, and pre-fills both grids so every position is defined before any
//! cell is placed.

use super::{content, index::BlockIndex, resolve};
use crate::analysis::types::{Block, EntityType};
use crate::types::CellMetadata;

/// A fully-built dense grid pair for one table.
pub struct TableGrid {
    pub row_count: usize,
    pub column_count: usize,
    /// Cell contents, `row_count` x `column_count`, empty string where no
    /// source cell mapped.
    pub content: Vec<Vec<String>>,
    /// Cell provenance, same dimensions, zeroed where no source cell
    /// mapped.
    pub cells: Vec<Vec<CellMetadata>>,
    /// Mean confidence over the resolved cells, 0 when there are none.
    pub mean_confidence: f64,
}

struct PlacedCell<'a> {
    block: &'a Block,
    row: usize,
    col: usize,
    content: String,
}

/// Map a source 1-based index to a 0-based grid slot. Missing indices
/// default to slot 0; a malformed 0 saturates to 0 instead of wrapping.
fn normalize_index(index: Option<u32>) -> usize {
    index.unwrap_or(1).saturating_sub(1) as usize
}

/// Header flag for a placed cell. An entity-type list supplied by the
/// source is the explicit signal and takes precedence; otherwise row 0 is
/// the header row.
fn header_flag(block: &Block, row: usize) -> bool {
    if block.entity_types.is_empty() {
        row == 0
    } else {
        block.entity_types.contains(&EntityType::ColumnHeader)
    }
}

/// Build the dense grid pair for one table's resolved cells.
///
/// Two cells mapping to the same position resolve last-write-wins in
/// relationship-resolved order. This is a deliberate, deterministic policy
/// for duplicate detections, not an attempt at reconciliation.
pub fn build<'a>(cells: &[&'a Block], index: &BlockIndex<'a>) -> TableGrid {
    let placed: Vec<PlacedCell<'a>> = cells
        .iter()
        .map(|cell| {
            let children = resolve::cell_children(cell, index);
            PlacedCell {
                block: cell,
                row: normalize_index(cell.row_index),
                col: normalize_index(cell.column_index),
                content: content::assemble(cell, &children),
            }
        })
        .collect();

    let row_count = placed.iter().map(|cell| cell.row + 1).max().unwrap_or(0);
    let column_count = placed.iter().map(|cell| cell.col + 1).max().unwrap_or(0);

    let mut content_grid = vec![vec![String::new(); column_count]; row_count];
    let mut cell_grid: Vec<Vec<CellMetadata>> = vec![vec![CellMetadata::default(); column_count]; row_count];

    let mut confidence_sum = 0.0;
    for cell in &placed {
        confidence_sum += cell.block.confidence.unwrap_or(0.0);

        if cell.row >= row_count || cell.col >= column_count {
            // Cannot occur given how the dimensions were just computed, but
            // a malformed placement must never fault the pipeline.
            tracing::warn!(
                cell_id = %cell.block.id,
                row = cell.row,
                col = cell.col,
                "discarding out-of-bounds cell"
            );
            continue;
        }

        content_grid[cell.row][cell.col] = cell.content.clone();
        cell_grid[cell.row][cell.col] = CellMetadata {
            confidence: cell.block.confidence.unwrap_or(0.0),
            bounding_box: cell.block.bounding_box(),
            content: cell.content.clone(),
            row_index: cell.row as u32,
            column_index: cell.col as u32,
            is_header: header_flag(cell.block, cell.row),
            relationships: cell.block.relationships.clone(),
        };
    }

    let mean_confidence = if placed.is_empty() {
        0.0
    } else {
        confidence_sum / placed.len() as f64
    };

    TableGrid {
        row_count,
        column_count,
        content: content_grid,
        cells: cell_grid,
        mean_confidence,
    }
}
