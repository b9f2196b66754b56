//! Resolution of CHILD relationship edges into concrete block references.
//!
//! Analysis result sets are not guaranteed internally consistent: a parent
//! may reference ids that never arrived. Unresolvable ids are dropped
//! silently (logged at trace level) rather than treated as errors.

use super::index::BlockIndex;
use crate::analysis::types::Block;

/// Resolve a TABLE block's CHILD ids against the cell map, in wire order.
///
/// Dangling ids are dropped. An empty result is valid and yields a 0x0
/// table downstream.
pub fn table_cells<'a>(table: &'a Block, index: &BlockIndex<'a>) -> Vec<&'a Block> {
    table
        .child_ids()
        .filter_map(|id| {
            let cell = index.cell(id);
            if cell.is_none() {
                tracing::trace!(table_id = %table.id, child_id = %id, "dropping unresolvable cell id");
            }
            cell
        })
        .collect()
}

/// Resolve a CELL block's CHILD ids against the word and line maps, in wire
/// order. Dangling ids are dropped.
pub fn cell_children<'a>(cell: &'a Block, index: &BlockIndex<'a>) -> Vec<&'a Block> {
    cell.child_ids()
        .filter_map(|id| {
            let child = index.word(id).or_else(|| index.line(id));
            if child.is_none() {
                tracing::trace!(cell_id = %cell.id, child_id = %id, "dropping unresolvable child id");
            }
            child
        })
        .collect()
}
