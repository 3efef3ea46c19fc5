//! Error taxonomy for the upload/poll pipeline and its HTTP translation.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Everything that can go wrong between accepting a droplet and reporting
/// the job outcome.
///
/// The variants split into client input problems (`MissingContentLength`),
/// upstream protocol problems (`UnexpectedStatus`, `Transport`,
/// `BadUrl`), and job-level outcomes (`JobFailed`, `PollTimeout`).
#[derive(Debug, Error)]
pub enum CcError {
    /// The inbound request carried no usable Content-Length. Detected
    /// before any outbound call is made.
    #[error("Content-Length header is missing or invalid")]
    MissingContentLength,

    /// The cloud controller answered with a status outside the protocol
    /// (upload calls must return 201, polls must return 2xx).
    #[error("cloud controller returned unexpected status {0}")]
    UnexpectedStatus(StatusCode),

    /// Network failure or unparsable body on an outbound call.
    #[error("cloud controller request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A cloud controller URL (base address or the job status URL from an
    /// upload response) could not be parsed or resolved.
    #[error("invalid cloud controller URL: {0}")]
    BadUrl(#[from] url::ParseError),

    /// The backend reports the job itself as failed. Not a transport
    /// error; the upload reached the controller.
    #[error("job {guid} failed")]
    JobFailed { guid: String },

    /// The job did not reach a terminal state within the configured
    /// polling budget.
    #[error("job {guid} did not reach a terminal state within {limit:?}")]
    PollTimeout { guid: String, limit: Duration },
}

impl CcError {
    /// Status code surfaced to the original client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CcError::MissingContentLength => StatusCode::BAD_REQUEST,
            CcError::UnexpectedStatus(_)
            | CcError::Transport(_)
            | CcError::BadUrl(_)
            | CcError::JobFailed { .. }
            | CcError::PollTimeout { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CcError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
