//! Cell content assembly.
//!
//! A cell's text is the space-joined text of its WORD children, taken in
//! relationship order — not re-sorted by geometry, since the analysis
//! backend already emits words in reading order.

use crate::analysis::types::{Block, BlockType};

/// Assemble the text content for one cell from its resolved children.
///
/// WORD children are joined with single spaces in relationship order;
/// word blocks without text contribute nothing. A cell with no word
/// children at all falls back to its own direct `text` field. The result
/// is always a string, possibly empty, so grids stay dense.
pub fn assemble(cell: &Block, children: &[&Block]) -> String {
    let word_blocks: Vec<&Block> = children
        .iter()
        .copied()
        .filter(|child| child.block_type == BlockType::Word)
        .collect();

    if word_blocks.is_empty() {
        return cell.text.clone().unwrap_or_default();
    }

    word_blocks
        .iter()
        .filter_map(|word| word.text.as_deref())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
