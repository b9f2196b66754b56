//! Configuration loading and management.
//!
//! [`ReconstructionConfig`] covers the tunable parts of the pipeline: the
//! caption proximity window, the default header row count, and the job
//! driver's polling cadence. Configs can be created programmatically, or
//! loaded from TOML or JSON files (dispatched on file extension). Every
//! field has a default, so an empty config file is valid.

use crate::error::{DocgridError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_caption_search_ratio() -> f64 {
    0.02
}

fn default_header_row_count() -> usize {
    1
}

fn default_interval_ms() -> u64 {
    5000
}

fn default_max_attempts() -> u32 {
    120
}

/// Tunables for table reconstruction.
///
/// # Example
///
/// ```rust
/// use docgrid::config::ReconstructionConfig;
///
/// let config = ReconstructionConfig::default();
/// assert_eq!(config.caption_search_ratio, 0.02);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionConfig {
    /// Vertical window above a table's top edge, as a fraction of page
    /// height, inside which a text line qualifies as its caption.
    ///
    /// The 2% default is a heuristic inherited from production tuning, not
    /// a derived constant; adjust per corpus.
    #[serde(default = "default_caption_search_ratio")]
    pub caption_search_ratio: f64,

    /// Header rows recorded in each table's structure when the source does
    /// not say otherwise.
    #[serde(default = "default_header_row_count")]
    pub header_row_count: usize,

    /// Polling cadence for the analysis job driver.
    #[serde(default)]
    pub polling: PollingConfig,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            caption_search_ratio: default_caption_search_ratio(),
            header_row_count: default_header_row_count(),
            polling: PollingConfig::default(),
        }
    }
}

/// Polling cadence and bound for the analysis job driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between status polls, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Maximum number of non-terminal polls before giving up. The default
    /// (120 polls at 5 s) bounds a job to roughly ten minutes.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl ReconstructionConfig {
    /// Load configuration from a TOML or JSON file, dispatched on the file
    /// extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            other => {
                return Err(DocgridError::validation(format!(
                    "Unsupported config format: '{}'. Must be .toml or .json",
                    other.unwrap_or("")
                )));
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that every field is inside its valid range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.caption_search_ratio) {
            return Err(DocgridError::validation(format!(
                "caption_search_ratio must be within [0, 1], got {}",
                self.caption_search_ratio
            )));
        }
        if self.polling.interval_ms == 0 {
            return Err(DocgridError::validation("polling.interval_ms must be non-zero"));
        }
        if self.polling.max_attempts == 0 {
            return Err(DocgridError::validation("polling.max_attempts must be non-zero"));
        }
        Ok(())
    }
}
