//! Output record types handed to the persistence collaborator.
//!
//! One [`TableRecord`] is produced per detected table per completed job.
//! Records serialize with camelCase field names, the shape the persistence
//! layer stores as-is. Cell provenance keeps the raw relationship edges of
//! the source blocks, so the original analysis output remains traceable
//! from a stored table.
//!
//! Grid invariants: `original_data` and `cell_metadata` are dense
//! `row_count` x `column_count` grids with every position defined.
//! `current_data` starts as a deep copy of `original_data` and is the only
//! grid the (external) editing surface ever mutates.

use crate::analysis::types::{BoundingBox, Relationship};
use serde::{Deserialize, Serialize};

/// A reconstructed table, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecord {
    /// 1-based page the table was detected on.
    pub page_number: u32,
    pub bounding_box: BoundingBox,
    /// Nearest qualifying text line above the table, if any. `None` is a
    /// common, valid outcome.
    pub caption: Option<Caption>,
    pub structure: TableStructure,
    /// Immutable snapshot of the reconstructed cell contents.
    pub original_data: Vec<Vec<String>>,
    /// Working copy seeded from `original_data`; edits land here only.
    pub current_data: Vec<Vec<String>>,
    pub metadata: TableMetadata,
    /// Per-cell provenance, same dimensions as `original_data`.
    pub cell_metadata: Vec<Vec<CellMetadata>>,
    /// Mean confidence over the table's resolved cells, 0-100.
    pub processing_confidence: f64,
}

/// Structural description of a table grid.
///
/// `merged_cells` and `highlights` are created empty; they are owned by the
/// editing surface and persisted alongside the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStructure {
    pub row_count: usize,
    pub column_count: usize,
    pub header_row_count: usize,
    #[serde(default)]
    pub merged_cells: Vec<MergedCellSpan>,
    #[serde(default)]
    pub highlights: Vec<CellHighlight>,
}

/// A rectangular span of merged cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedCellSpan {
    pub start_row: usize,
    pub start_col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

/// A highlighted cell position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellHighlight {
    pub row: usize,
    pub col: usize,
    pub color: String,
}

/// Provenance for the source TABLE block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    /// Detection confidence of the table block itself, 0-100.
    pub table_confidence: f64,
    /// Id of the source TABLE block within its job's result set.
    pub block_id: String,
    /// Raw relationship edges of the source TABLE block.
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Per-cell provenance and placement metadata.
///
/// The zero-valued [`Default`] fills grid positions no source cell mapped
/// to, keeping the metadata grid dense.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellMetadata {
    pub confidence: f64,
    pub bounding_box: Option<BoundingBox>,
    pub content: String,
    /// 0-based output row, renormalized from the source's 1-based index.
    pub row_index: u32,
    /// 0-based output column, renormalized from the source's 1-based index.
    pub column_index: u32,
    pub is_header: bool,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// A caption matched to a table by spatial proximity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    pub text: String,
    pub confidence: f64,
    pub bounding_box: Option<BoundingBox>,
}

/// Compact per-table digest used in per-page summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub row_count: usize,
    pub column_count: usize,
    pub caption: Option<String>,
}
