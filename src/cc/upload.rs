//! Droplet upload relay.
//!
//! # Responsibilities
//! - Stream the inbound droplet bytes to the cloud controller without
//!   buffering the whole file
//! - Wrap the bytes in the multipart shape the controller expects
//! - Forward the client's Content-MD5 header verbatim
//! - Parse the job descriptor out of the controller's 201 response
//!
//! # Design Decisions
//! - The uploaded filename is always `droplet.tgz`, regardless of any
//!   client-supplied name
//! - Exactly one job is created per successful call; the upload is never
//!   retried because job creation is not idempotent

use axum::http::{HeaderName, HeaderValue, StatusCode};
use reqwest::multipart::{Form, Part};

use crate::cc::client::CcClient;
use crate::cc::error::CcError;
use crate::cc::types::{JobDescriptor, JobResponse, JobStatus};

/// Multipart field name the cloud controller reads the droplet from.
pub const UPLOAD_FIELD: &str = "upload[droplet]";

/// Filename presented to the cloud controller for every droplet.
pub const UPLOAD_FILENAME: &str = "droplet.tgz";

/// Header carrying the client's checksum, forwarded untouched.
pub const CONTENT_MD5: HeaderName = HeaderName::from_static("content-md5");

/// Relays one droplet to the controller's upload-creation endpoint.
#[derive(Debug, Clone)]
pub struct DropletUploader {
    client: CcClient,
}

impl DropletUploader {
    pub fn new(client: CcClient) -> Self {
        Self { client }
    }

    /// Stream a droplet to `POST /staging/droplets/{app_guid}/upload?async=true`.
    ///
    /// On success returns the job descriptor plus the status embedded in
    /// the upload response, so the caller can skip polling entirely when
    /// the controller completed the job synchronously.
    pub async fn upload(
        &self,
        app_guid: &str,
        content_length: u64,
        content_md5: Option<HeaderValue>,
        droplet: reqwest::Body,
    ) -> Result<(JobDescriptor, JobStatus), CcError> {
        let part = Part::stream_with_length(droplet, content_length)
            .file_name(UPLOAD_FILENAME)
            .mime_str("application/octet-stream")?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let mut request = self
            .client
            .post(&format!("staging/droplets/{}/upload", app_guid))?
            .query(&[("async", "true")])
            .multipart(form);
        if let Some(md5) = content_md5 {
            request = request.header(CONTENT_MD5, md5);
        }

        let response = request.send().await?;
        let status = response.status();
        if status != StatusCode::CREATED {
            tracing::warn!(app_guid, %status, "upload rejected by cloud controller");
            return Err(CcError::UnexpectedStatus(status));
        }

        let body: JobResponse = response.json().await?;
        let descriptor = JobDescriptor::from_metadata(self.client.base(), &body.metadata)?;
        let initial_status = JobStatus::from(body.entity.status.as_str());

        tracing::info!(
            app_guid,
            job_guid = %descriptor.guid,
            status = %initial_status,
            "droplet accepted, job created"
        );

        Ok((descriptor, initial_status))
    }
}
