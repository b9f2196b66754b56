//! Table reconstruction pipeline.
//!
//! Turns one job's flat block list into finished [`TableRecord`]s:
//!
//! 1. [`index`] - single pass, type-partitioned id lookups
//! 2. [`resolve`] - CHILD edges to concrete references, dangling ids dropped
//! 3. [`content`] - word-join cell text with direct-text fallback
//! 4. [`grid`] - dense content + metadata grids, header inference
//! 5. [`caption`] - nearest qualifying text line above each table
//!
//! The pipeline is pure data transformation: no I/O, no shared mutable
//! state, and no failure mode for malformed input. Each table's grid is
//! built independently, so tables fan out across threads; output order
//! still follows block encounter order.

pub mod caption;
pub mod content;
pub mod grid;
pub mod index;
pub mod resolve;

use crate::analysis::types::Block;
use crate::config::ReconstructionConfig;
use crate::types::{TableMetadata, TableRecord, TableStructure, TableSummary};
use index::BlockIndex;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Reconstructs tables from analysis block lists.
///
/// # Example
///
/// ```rust
/// use docgrid::{Block, ReconstructionConfig, TableReconstructor};
///
/// let blocks: Vec<Block> = serde_json::from_str(
///     r#"[
///         {"Id": "t1", "BlockType": "TABLE", "Page": 1,
///          "Relationships": [{"Type": "CHILD", "Ids": ["c1"]}]},
///         {"Id": "c1", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1,
///          "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}]},
///         {"Id": "w1", "BlockType": "WORD", "Text": "Qty"}
///     ]"#,
/// ).unwrap();
///
/// let reconstructor = TableReconstructor::new(ReconstructionConfig::default());
/// let records = reconstructor.reconstruct(&blocks);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].original_data, vec![vec!["Qty".to_string()]]);
/// ```
pub struct TableReconstructor {
    config: ReconstructionConfig,
}

impl TableReconstructor {
    pub fn new(config: ReconstructionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReconstructionConfig {
        &self.config
    }

    /// Reconstruct every table in one job's block list.
    ///
    /// Returns zero or more records; zero means the document had no
    /// detectable tables, which is a success, not an error.
    pub fn reconstruct(&self, blocks: &[Block]) -> Vec<TableRecord> {
        let index = BlockIndex::build(blocks);
        tracing::debug!(counts = ?index.counts(), "indexed analysis blocks");

        let tables: Vec<&Block> = index.tables().collect();
        let records: Vec<TableRecord> = tables
            .into_par_iter()
            .map(|table| self.build_record(table, &index))
            .collect();

        tracing::debug!(table_count = records.len(), "reconstructed tables");
        records
    }

    fn build_record(&self, table: &Block, index: &BlockIndex<'_>) -> TableRecord {
        let cells = resolve::table_cells(table, index);
        let grid = grid::build(&cells, index);
        let caption = caption::match_caption(table, index.lines(), self.config.caption_search_ratio);

        TableRecord {
            page_number: table.page_or_default(),
            bounding_box: table.bounding_box().unwrap_or_default(),
            caption,
            structure: TableStructure {
                row_count: grid.row_count,
                column_count: grid.column_count,
                header_row_count: self.config.header_row_count,
                merged_cells: Vec::new(),
                highlights: Vec::new(),
            },
            current_data: grid.content.clone(),
            original_data: grid.content,
            metadata: TableMetadata {
                table_confidence: table.confidence.unwrap_or(0.0),
                block_id: table.id.clone(),
                relationships: table.relationships.clone(),
            },
            cell_metadata: grid.cells,
            processing_confidence: grid.mean_confidence,
        }
    }
}

/// Reconstruct every table in a block list with the given configuration.
///
/// Convenience wrapper over [`TableReconstructor`].
pub fn reconstruct_tables(blocks: &[Block], config: &ReconstructionConfig) -> Vec<TableRecord> {
    TableReconstructor::new(config.clone()).reconstruct(blocks)
}

/// Group records into per-page digests, keyed by page number.
///
/// Callers wanting page-ordered presentation use this; the record list
/// itself stays in detection order.
pub fn summarize_by_page(records: &[TableRecord]) -> BTreeMap<u32, Vec<TableSummary>> {
    let mut pages: BTreeMap<u32, Vec<TableSummary>> = BTreeMap::new();
    for record in records {
        pages.entry(record.page_number).or_default().push(TableSummary {
            row_count: record.structure.row_count,
            column_count: record.structure.column_count,
            caption: record.caption.as_ref().map(|caption| caption.text.clone()),
        });
    }
    pages
}
