//! Asynchronous job driver for the external analysis backend.
//!
//! Document analysis is a long-running remote job: submit, poll a status
//! endpoint at a fixed cadence, then fetch paginated results once the job
//! reports a terminal status. This module models that loop as an explicit
//! state machine ([`JobState`]) with a bounded attempt count, driven against
//! whatever backend implements [`AnalysisProvider`].
//!
//! The job id and block list flow through as explicit values; nothing here
//! is ambient or shared, so any number of jobs can be driven concurrently
//! from the same provider.
//!
//! # Example
//!
//! ```no_run
//! use docgrid::analysis::job::{AnalysisProvider, DocumentLocation, JobDriver};
//! use docgrid::config::PollingConfig;
//!
//! # async fn example(provider: impl AnalysisProvider) -> docgrid::Result<()> {
//! let driver = JobDriver::new(provider, PollingConfig::default());
//! let location = DocumentLocation::new("scans", "invoices/2024-03.pdf");
//! let blocks = driver.run(&location).await?;
//! println!("{} blocks", blocks.len());
//! # Ok(())
//! # }
//! ```

use super::types::{Block, JobStatus, ResultPage};
use crate::config::{PollingConfig, ReconstructionConfig};
use crate::error::{DocgridError, Result};
use crate::types::TableRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

/// Blob-store coordinates of a source document. Opaque to this crate; the
/// provider interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLocation {
    pub bucket: String,
    pub key: String,
}

impl DocumentLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// Interface the external analysis backend implements.
///
/// The backend owns submission, status reporting, and paginated result
/// delivery; this crate owns nothing past the trait boundary. Transport
/// failures surface as [`DocgridError::Analysis`].
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Submit a document for table analysis, returning the job id.
    async fn start_analysis(&self, location: &DocumentLocation) -> Result<String>;

    /// Report the current status of a submitted job.
    async fn job_status(&self, job_id: &str) -> Result<JobStatus>;

    /// Fetch one page of results for a succeeded job. Pass the previous
    /// page's `next_token` to continue; `None` starts from the first page.
    async fn fetch_results(&self, job_id: &str, next_token: Option<&str>) -> Result<ResultPage>;
}

/// Lifecycle of one analysis job as seen by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    /// Submitted, no status observed yet.
    Submitted,
    /// Waiting on a non-terminal status; `attempts` polls consumed so far.
    Polling { attempts: u32 },
    /// Terminal success; results may be fetched.
    Succeeded,
    /// Terminal non-success; no results exist.
    Failed { status: JobStatus },
}

impl JobState {
    /// Whether the job has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed { .. })
    }
}

/// Drives one analysis job from submission to a full block list.
///
/// The poll interval and attempt bound come from [`PollingConfig`]; when the
/// bound is exhausted before a terminal status the driver gives up with
/// [`DocgridError::PollTimeout`] rather than waiting forever.
pub struct JobDriver<P> {
    provider: P,
    polling: PollingConfig,
}

impl<P: AnalysisProvider> JobDriver<P> {
    pub fn new(provider: P, polling: PollingConfig) -> Self {
        Self { provider, polling }
    }

    /// The provider this driver polls against.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Submit the document and run the poll loop to completion, returning
    /// the job's full block list.
    ///
    /// # Errors
    ///
    /// - [`DocgridError::JobFailed`] when the job reaches a terminal status
    ///   other than `SUCCEEDED`; no partial results are returned.
    /// - [`DocgridError::PollTimeout`] when `max_attempts` polls all report
    ///   a non-terminal status.
    /// - [`DocgridError::Analysis`] for provider transport failures.
    pub async fn run(&self, location: &DocumentLocation) -> Result<Vec<Block>> {
        let job_id = self.provider.start_analysis(location).await?;
        tracing::debug!(job_id = %job_id, bucket = %location.bucket, key = %location.key, "analysis job submitted");

        match self.poll_until_terminal(&job_id).await? {
            JobState::Succeeded => self.drain_results(&job_id).await,
            JobState::Failed { status } => {
                tracing::warn!(job_id = %job_id, status = %status, "analysis job failed");
                Err(DocgridError::JobFailed {
                    job_id,
                    status: status.to_string(),
                })
            }
            state => unreachable!("poll loop returned non-terminal state {state:?}"),
        }
    }

    /// Poll the status endpoint until the job is terminal or the attempt
    /// bound runs out.
    async fn poll_until_terminal(&self, job_id: &str) -> Result<JobState> {
        let interval = Duration::from_millis(self.polling.interval_ms);
        let mut state = JobState::Submitted;

        loop {
            let attempts = match state {
                JobState::Submitted => 0,
                JobState::Polling { attempts } => attempts,
                ref terminal => return Ok(terminal.clone()),
            };
            if attempts >= self.polling.max_attempts {
                return Err(DocgridError::PollTimeout {
                    job_id: job_id.to_string(),
                    attempts,
                });
            }

            sleep(interval).await;
            let status = self.provider.job_status(job_id).await?;
            tracing::trace!(job_id = %job_id, status = %status, attempt = attempts + 1, "poll");

            state = match status {
                JobStatus::InProgress => JobState::Polling {
                    attempts: attempts + 1,
                },
                JobStatus::Succeeded => JobState::Succeeded,
                other => JobState::Failed { status: other },
            };
        }
    }

    /// Fetch every result page for a succeeded job, following `next_token`
    /// until exhausted.
    async fn drain_results(&self, job_id: &str) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let page = self.provider.fetch_results(job_id, next_token.as_deref()).await?;
            blocks.extend(page.blocks);
            match page.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(job_id = %job_id, block_count = blocks.len(), "analysis results fetched");
        Ok(blocks)
    }
}

/// End-to-end processing of one document: drive the analysis job, then
/// reconstruct tables from its block list.
///
/// A failed job short-circuits with an error and zero records; a succeeded
/// job over a page with no detectable tables returns an empty list. The two
/// outcomes are deliberately distinct.
pub async fn process_document<P: AnalysisProvider>(
    provider: P,
    location: &DocumentLocation,
    config: &ReconstructionConfig,
) -> Result<Vec<TableRecord>> {
    let driver = JobDriver::new(provider, config.polling.clone());
    let blocks = driver.run(location).await?;
    Ok(crate::reconstruct::reconstruct_tables(&blocks, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Provider fed from scripted status/page queues.
    struct ScriptedProvider {
        statuses: Mutex<Vec<JobStatus>>,
        pages: Mutex<Vec<ResultPage>>,
        fetch_calls: AtomicU32,
    }

    impl ScriptedProvider {
        fn new(statuses: Vec<JobStatus>, pages: Vec<ResultPage>) -> Self {
            Self {
                statuses: Mutex::new(statuses),
                pages: Mutex::new(pages),
                fetch_calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl AnalysisProvider for ScriptedProvider {
        async fn start_analysis(&self, _location: &DocumentLocation) -> Result<String> {
            Ok("job-1".to_string())
        }

        async fn job_status(&self, _job_id: &str) -> Result<JobStatus> {
            let mut statuses = self.statuses.lock().unwrap();
            if statuses.is_empty() {
                Ok(JobStatus::InProgress)
            } else {
                Ok(statuses.remove(0))
            }
        }

        async fn fetch_results(&self, _job_id: &str, _next_token: Option<&str>) -> Result<ResultPage> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() {
                Ok(ResultPage::default())
            } else {
                Ok(pages.remove(0))
            }
        }
    }

    fn word(id: &str) -> Block {
        serde_json::from_str(&format!(r#"{{"Id": "{id}", "BlockType": "WORD"}}"#)).unwrap()
    }

    fn location() -> DocumentLocation {
        DocumentLocation::new("bucket", "key.pdf")
    }

    #[test]
    fn test_job_state_terminal() {
        assert!(!JobState::Submitted.is_terminal());
        assert!(!JobState::Polling { attempts: 3 }.is_terminal());
        assert!(JobState::Succeeded.is_terminal());
        assert!(
            JobState::Failed {
                status: JobStatus::Failed
            }
            .is_terminal()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_drains_paginated_results() {
        let provider = ScriptedProvider::new(
            vec![JobStatus::InProgress, JobStatus::Succeeded],
            vec![
                ResultPage {
                    blocks: vec![word("w1"), word("w2")],
                    next_token: Some("page-2".to_string()),
                },
                ResultPage {
                    blocks: vec![word("w3")],
                    next_token: None,
                },
            ],
        );
        let driver = JobDriver::new(provider, PollingConfig::default());

        let blocks = driver.run(&location()).await.unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2].id, "w3");
        assert_eq!(driver.provider().fetch_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_fails_without_fetching() {
        let provider = ScriptedProvider::new(vec![JobStatus::Failed], vec![]);
        let driver = JobDriver::new(provider, PollingConfig::default());

        let err = driver.run(&location()).await.unwrap_err();
        match err {
            DocgridError::JobFailed { job_id, status } => {
                assert_eq!(job_id, "job-1");
                assert_eq!(status, "FAILED");
            }
            other => panic!("expected JobFailed, got {other:?}"),
        }
        assert_eq!(driver.provider().fetch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_timeout_after_max_attempts() {
        let provider = ScriptedProvider::new(vec![], vec![]);
        let polling = PollingConfig {
            interval_ms: 10,
            max_attempts: 3,
        };
        let driver = JobDriver::new(provider, polling);

        let err = driver.run(&location()).await.unwrap_err();
        match err {
            DocgridError::PollTimeout { job_id, attempts } => {
                assert_eq!(job_id, "job-1");
                assert_eq!(attempts, 3);
            }
            other => panic!("expected PollTimeout, got {other:?}"),
        }
    }
}
