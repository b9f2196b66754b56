//! Document analysis collaborator: wire types and the async job driver.
//!
//! The analysis backend itself (OCR, layout detection) is external to this
//! crate. What lives here is the contract it is consumed through: the flat
//! [`Block`](types::Block) model its results arrive in, and the
//! polling job driver that turns a submitted document into a complete block
//! list or a terminal error.
//!
//! The driver requires the `tokio-runtime` feature (enabled by default).

pub mod types;

#[cfg(feature = "tokio-runtime")]
pub mod job;

pub use types::{
    Block, BlockType, BoundingBox, EntityType, Geometry, JobStatus, Point, Relationship,
    RelationshipType, ResultPage,
};

#[cfg(feature = "tokio-runtime")]
pub use job::{AnalysisProvider, DocumentLocation, JobDriver, JobState, process_document};
