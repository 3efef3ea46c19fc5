//! Wire types and job state shared by the uploader and the poller.

use serde::Deserialize;
use url::Url;

use crate::cc::error::CcError;

/// Response body returned by both the upload-creation call and the job
/// status endpoint:
///
/// ```json
/// { "metadata": { "guid": "...", "url": "..." },
///   "entity": { "status": "queued" } }
/// ```
#[derive(Debug, Deserialize)]
pub struct JobResponse {
    pub metadata: JobMetadata,
    pub entity: JobEntity,
}

#[derive(Debug, Deserialize)]
pub struct JobMetadata {
    pub guid: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct JobEntity {
    pub status: String,
}

/// Identity of an asynchronous job on the cloud controller.
///
/// Produced once from the upload response and never mutated.
#[derive(Debug, Clone)]
pub struct JobDescriptor {
    /// Opaque job identifier, used only for logging.
    pub guid: String,
    /// Resolved absolute URL of the job status endpoint.
    pub status_url: Url,
}

impl JobDescriptor {
    /// Build a descriptor from the metadata of an upload response.
    ///
    /// The status URL in the response may be absolute or relative to the
    /// cloud controller base address; both forms resolve here.
    pub fn from_metadata(base: &Url, metadata: &JobMetadata) -> Result<Self, CcError> {
        let status_url = base.join(&metadata.url)?;
        Ok(Self {
            guid: metadata.guid.clone(),
            status_url,
        })
    }
}

/// Job state as reported by the cloud controller.
///
/// `Finished` and `Failed` are terminal. Anything unrecognized is carried
/// as `Unknown` and treated as "not yet done" so that new backend states
/// keep the poller waiting instead of breaking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Running,
    Finished,
    Failed,
    Unknown(String),
}

impl JobStatus {
    /// Returns true once no further polling can change the outcome.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Finished | JobStatus::Failed)
    }
}

impl From<&str> for JobStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "queued" => JobStatus::Queued,
            "running" => JobStatus::Running,
            "finished" => JobStatus::Finished,
            "failed" => JobStatus::Failed,
            other => JobStatus::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => f.write_str("queued"),
            JobStatus::Running => f.write_str("running"),
            JobStatus::Finished => f.write_str("finished"),
            JobStatus::Failed => f.write_str("failed"),
            JobStatus::Unknown(raw) => write!(f, "unknown({})", raw),
        }
    }
}
