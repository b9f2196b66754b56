//! docgrid - Table Reconstruction for Document Analysis Output
//!
//! docgrid rebuilds structured, editable data tables from the flat block
//! streams produced by document-analysis backends: typed blocks (table,
//! cell, line, word, ...) with geometry, parent/child relationships, and
//! confidence scores, arriving unordered and not guaranteed consistent.
//!
//! # Quick Start
//!
//! ```rust
//! use docgrid::{Block, ReconstructionConfig, reconstruct_tables};
//!
//! let blocks: Vec<Block> = serde_json::from_str(
//!     r#"[
//!         {"Id": "t1", "BlockType": "TABLE", "Page": 1,
//!          "Relationships": [{"Type": "CHILD", "Ids": ["c1"]}]},
//!         {"Id": "c1", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1,
//!          "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}]},
//!         {"Id": "w1", "BlockType": "WORD", "Text": "Qty"}
//!     ]"#,
//! ).unwrap();
//!
//! let tables = reconstruct_tables(&blocks, &ReconstructionConfig::default());
//! assert_eq!(tables[0].original_data, vec![vec!["Qty".to_string()]]);
//! ```
//!
//! # Architecture
//!
//! - **Analysis** (`analysis`): the external backend's wire model and the
//!   async polling job driver (submit, poll with a bounded attempt count,
//!   drain paginated results)
//! - **Reconstruction** (`reconstruct`): index, relationship resolution,
//!   cell content assembly, dense grid construction, caption matching
//! - **Records** (`types`): the persistence-ready table shape with dense
//!   content and provenance grids
//!
//! # Guarantees
//!
//! - Grids are dense: every `(row, column)` position is defined, with empty
//!   strings / zeroed metadata where the analysis omitted a cell.
//! - Malformed input (dangling ids, missing fields, unknown block types)
//!   degrades to defaults; reconstruction itself never fails.
//! - A failed analysis job yields one terminal error and zero records,
//!   distinct from a succeeded job with zero tables.

#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod reconstruct;
pub mod types;

pub use error::{DocgridError, Result};

pub use analysis::types::{
    Block, BlockType, BoundingBox, EntityType, Geometry, JobStatus, Point, Relationship,
    RelationshipType, ResultPage,
};

#[cfg(feature = "tokio-runtime")]
pub use analysis::job::{AnalysisProvider, DocumentLocation, JobDriver, JobState, process_document};

pub use config::{PollingConfig, ReconstructionConfig};

pub use reconstruct::{TableReconstructor, reconstruct_tables, summarize_by_page};
pub use reconstruct::index::{BlockIndex, IndexCounts};

pub use types::{
    Caption, CellHighlight, CellMetadata, MergedCellSpan, TableMetadata, TableRecord,
    TableStructure, TableSummary,
};
