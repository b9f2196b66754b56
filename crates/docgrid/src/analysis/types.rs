//! Wire-level types for the document analysis collaborator.
//!
//! The analysis backend delivers one flat list of [`Block`] records per
//! completed job. Field names on the wire are PascalCase (`Id`, `BlockType`,
//! `RowIndex`, ...), which the serde attributes here map onto idiomatic Rust
//! names. Every field except `id` and `block_type` is optional on the wire;
//! the reconstruction pipeline supplies defaults instead of rejecting
//! malformed blocks.
//!
//! Block and relationship types are closed enums with an explicit `Unknown`
//! catch-all so that new vendor block types deserialize cleanly instead of
//! failing the whole result set.

use serde::{Deserialize, Serialize};

/// The kind of analysis primitive a [`Block`] represents.
///
/// Only `Table`, `Cell`, `Line`, and `Word` participate in table
/// reconstruction; all other variants are indexed for forward compatibility
/// and otherwise ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Page,
    Table,
    Cell,
    MergedCell,
    Line,
    Word,
    SelectionElement,
    TableTitle,
    TableFooter,
    KeyValueSet,
    Query,
    QueryResult,
    Signature,
    #[serde(other)]
    Unknown,
}

/// Typed edge kind on a [`Relationship`].
///
/// Reconstruction only follows `Child` edges (parent -> child containment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Child,
    MergedCell,
    Value,
    ComplexFeatures,
    Title,
    TableTitle,
    TableFooter,
    Answer,
    #[serde(other)]
    Unknown,
}

/// Semantic tag the analysis backend attaches to some blocks.
///
/// `ColumnHeader` on a CELL block is the explicit header flag and takes
/// precedence over positional header inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    ColumnHeader,
    TableTitle,
    TableFooter,
    TableSummary,
    StructuredTable,
    SemiStructuredTable,
    #[serde(other)]
    Unknown,
}

/// A typed edge from one block to others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    #[serde(rename = "Type")]
    pub relationship_type: RelationshipType,
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Axis-aligned bounding box in normalized page-relative fractions [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
}

impl BoundingBox {
    /// The y coordinate of the bottom edge (`top + height`).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// The x coordinate of the right edge (`left + width`).
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// One vertex of a block's polygon outline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Point {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Geometry attached to a block: a bounding box plus an optional polygon of
/// ordered vertices for non-rectangular regions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Geometry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Vec<Point>>,
}

/// One analysis primitive: a table, cell, line, word, or other detected
/// region with geometry, relationships, and a confidence score.
///
/// `id` is unique within one job's result set. Children are reachable only
/// through `relationships` entries of type [`RelationshipType::Child`]; an
/// absent or empty relationship list means "no children".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    pub id: String,
    pub block_type: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<EntityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

impl Block {
    /// Iterate the target ids of all CHILD relationships, in wire order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|rel| rel.relationship_type == RelationshipType::Child)
            .flat_map(|rel| rel.ids.iter().map(String::as_str))
    }

    /// The block's bounding box, if it carries geometry.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.geometry.as_ref().and_then(|geometry| geometry.bounding_box)
    }

    /// The block's page number, defaulting to 1 for single-page result sets
    /// that omit it.
    pub fn page_or_default(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

/// Terminal and non-terminal states reported by the analysis backend for a
/// submitted job. Only `Succeeded` yields results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    InProgress,
    Succeeded,
    Failed,
    PartialSuccess,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Whether this status ends the polling loop.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::InProgress)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::PartialSuccess => "PARTIAL_SUCCESS",
            JobStatus::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// One page of a paginated result fetch. `next_token` is `None` on the last
/// page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultPage {
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}
