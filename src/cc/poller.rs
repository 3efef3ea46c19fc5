//! Job status polling loop.
//!
//! # State Machine
//! ```text
//!            ┌────────── sleep(interval), GET status ──────────┐
//!            ▼                                                 │
//!   queued / running / unknown ────────────────────────────────┘
//!            │
//!            ├──▶ finished  (terminal, success)
//!            └──▶ failed    (terminal, job error)
//! ```
//!
//! # Design Decisions
//! - Zero polls when the status embedded in the upload response is
//!   already terminal
//! - Polls for one job are strictly sequential, spaced one interval apart
//! - A transport or parse failure during a poll aborts the operation; it
//!   is not retried
//! - The loop is bounded by a wall-clock budget and reports a poll
//!   timeout on expiry
//! - Unrecognized statuses count as "not yet done" and keep the loop
//!   going; they are logged and counted separately

use std::time::Duration;

use tokio::time::Instant;

use crate::cc::client::CcClient;
use crate::cc::error::CcError;
use crate::cc::types::{JobDescriptor, JobResponse, JobStatus};
use crate::observability::metrics;

/// Tracks one cloud controller job to completion.
#[derive(Debug, Clone)]
pub struct JobPoller {
    client: CcClient,
    interval: Duration,
    timeout: Duration,
}

impl JobPoller {
    pub fn new(client: CcClient, interval: Duration, timeout: Duration) -> Self {
        Self {
            client,
            interval,
            timeout,
        }
    }

    /// Wait until the job reaches a terminal state.
    ///
    /// `initial` is the status embedded in the upload response; if it is
    /// already terminal no network call is made. Returns `Ok(())` for a
    /// finished job and an error for every other outcome.
    ///
    /// The returned future holds no background work: dropping it (for
    /// example because the inbound connection went away) stops the loop at
    /// the next await point.
    pub async fn await_completion(
        &self,
        job: &JobDescriptor,
        initial: JobStatus,
    ) -> Result<(), CcError> {
        let deadline = Instant::now() + self.timeout;
        let mut status = initial;

        loop {
            match status {
                JobStatus::Finished => {
                    tracing::info!(job_guid = %job.guid, "job finished");
                    return Ok(());
                }
                JobStatus::Failed => {
                    tracing::warn!(job_guid = %job.guid, "job failed");
                    return Err(CcError::JobFailed {
                        guid: job.guid.clone(),
                    });
                }
                JobStatus::Unknown(ref raw) => {
                    tracing::warn!(
                        job_guid = %job.guid,
                        status = %raw,
                        "unrecognized job status, still polling"
                    );
                    metrics::record_unknown_job_status(raw);
                }
                JobStatus::Queued | JobStatus::Running => {}
            }

            if Instant::now() >= deadline {
                tracing::error!(
                    job_guid = %job.guid,
                    last_status = %status,
                    timeout = ?self.timeout,
                    "gave up polling job"
                );
                return Err(CcError::PollTimeout {
                    guid: job.guid.clone(),
                    limit: self.timeout,
                });
            }

            tokio::time::sleep(self.interval).await;
            status = self.fetch_status(job).await?;
        }
    }

    /// Issue one authenticated GET against the job status URL.
    async fn fetch_status(&self, job: &JobDescriptor) -> Result<JobStatus, CcError> {
        let response = self.client.get(job.status_url.clone()).send().await?;
        let http_status = response.status();
        if !http_status.is_success() {
            return Err(CcError::UnexpectedStatus(http_status));
        }

        let body: JobResponse = response.json().await?;
        let status = JobStatus::from(body.entity.status.as_str());

        tracing::debug!(job_guid = %job.guid, %status, "polled job status");
        metrics::record_job_poll(&status);

        Ok(status)
    }
}
