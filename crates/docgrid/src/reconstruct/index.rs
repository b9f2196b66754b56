//! Single-pass index over one job's block list.
//!
//! Blocks arrive flat and in no guaranteed order; everything downstream
//! needs id lookups partitioned by type. Tables keep their encounter order
//! (it fixes the output record order), the rest are plain hash maps.

use crate::analysis::types::{Block, BlockType};
use ahash::AHashMap;
use indexmap::IndexMap;

/// Type-partitioned id lookups over a borrowed block list.
///
/// Building the index never fails: blocks missing expected fields are
/// indexed as-is, and duplicate ids resolve to the last block seen,
/// consistent with the grid builder's last-write-wins policy.
pub struct BlockIndex<'a> {
    tables: IndexMap<&'a str, &'a Block>,
    cells: AHashMap<&'a str, &'a Block>,
    lines: AHashMap<&'a str, &'a Block>,
    words: AHashMap<&'a str, &'a Block>,
    /// Every other type, unknown variants included. Preserved for forward
    /// compatibility; not consulted during reconstruction.
    other: AHashMap<&'a str, &'a Block>,
    /// LINE blocks in encounter order, for deterministic caption scans.
    line_order: Vec<&'a Block>,
}

impl<'a> BlockIndex<'a> {
    /// Index one job's block list. O(n) in block count.
    pub fn build(blocks: &'a [Block]) -> Self {
        let mut index = Self {
            tables: IndexMap::new(),
            cells: AHashMap::new(),
            lines: AHashMap::new(),
            words: AHashMap::new(),
            other: AHashMap::new(),
            line_order: Vec::new(),
        };

        for block in blocks {
            let id = block.id.as_str();
            match block.block_type {
                BlockType::Table => {
                    index.tables.insert(id, block);
                }
                BlockType::Cell => {
                    index.cells.insert(id, block);
                }
                BlockType::Line => {
                    index.lines.insert(id, block);
                    index.line_order.push(block);
                }
                BlockType::Word => {
                    index.words.insert(id, block);
                }
                _ => {
                    index.other.insert(id, block);
                }
            }
        }

        index
    }

    /// TABLE blocks in encounter order.
    pub fn tables(&self) -> impl Iterator<Item = &'a Block> + '_ {
        self.tables.values().copied()
    }

    pub fn cell(&self, id: &str) -> Option<&'a Block> {
        self.cells.get(id).copied()
    }

    pub fn line(&self, id: &str) -> Option<&'a Block> {
        self.lines.get(id).copied()
    }

    pub fn word(&self, id: &str) -> Option<&'a Block> {
        self.words.get(id).copied()
    }

    /// LINE blocks in encounter order.
    pub fn lines(&self) -> &[&'a Block] {
        &self.line_order
    }

    /// Per-type block counts, for diagnostics.
    pub fn counts(&self) -> IndexCounts {
        IndexCounts {
            tables: self.tables.len(),
            cells: self.cells.len(),
            lines: self.lines.len(),
            words: self.words.len(),
            other: self.other.len(),
        }
    }
}

/// Block counts per index partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexCounts {
    pub tables: usize,
    pub cells: usize,
    pub lines: usize,
    pub words: usize,
    pub other: usize,
}
