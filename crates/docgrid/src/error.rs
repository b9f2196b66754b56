//! Error types for docgrid.
//!
//! All fallible operations in the library return [`Result`], which wraps
//! [`DocgridError`]. Errors follow two rules:
//!
//! - **System errors bubble up unchanged**: `DocgridError::Io` (from
//!   `std::io::Error`) indicates a real filesystem problem and is never
//!   wrapped or suppressed.
//! - **Application errors carry context**: analysis transport failures,
//!   failed jobs, poll timeouts, and validation problems each have their own
//!   variant with the identifying data (job id, reported status, attempt
//!   count) in the message.
//!
//! Malformed *block data* is deliberately not an error anywhere in this
//! crate: dangling relationship ids, missing geometry, and absent text are
//! recovered with defaults inside the reconstruction pipeline. The error
//! type only covers the job driver, configuration, and serialization edges.
use thiserror::Error;

/// Result type alias using [`DocgridError`].
pub type Result<T> = std::result::Result<T, DocgridError>;

/// Main error type for all docgrid operations.
///
/// # Variants
///
/// - `Io` - File system and I/O errors (always bubble up)
/// - `Analysis` - Transport/backend errors from the analysis provider
/// - `JobFailed` - The analysis job reached a non-success terminal status
/// - `PollTimeout` - The polling bound was exhausted before a terminal status
/// - `Validation` - Invalid configuration or parameters
/// - `Serialization` - JSON/TOML serialization errors
#[derive(Debug, Error)]
pub enum DocgridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Analysis error: {message}")]
    Analysis {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Analysis job {job_id} failed with status {status}")]
    JobFailed { job_id: String, status: String },

    #[error("Analysis job {job_id} still in progress after {attempts} poll attempts")]
    PollTimeout { job_id: String, attempts: u32 },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<serde_json::Error> for DocgridError {
    fn from(err: serde_json::Error) -> Self {
        DocgridError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for DocgridError {
    fn from(err: toml::de::Error) -> Self {
        DocgridError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl DocgridError {
    /// Create an Analysis error
    pub fn analysis<S: Into<String>>(message: S) -> Self {
        Self::Analysis {
            message: message.into(),
            source: None,
        }
    }

    /// Create an Analysis error with source
    pub fn analysis_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Analysis {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Validation error with source
    pub fn validation_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
            source: None,
        }
    }
}
