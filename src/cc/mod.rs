//! Cloud controller client subsystem.
//!
//! # Data Flow
//! ```text
//! inbound droplet upload
//!     → upload.rs (stream multipart to the upload-creation endpoint)
//!     → types.rs (job descriptor parsed from the 201 response)
//!     → poller.rs (GET job status at a fixed interval until terminal)
//!     → error.rs (terminal outcome translated to an HTTP status)
//! ```
//!
//! # Design Decisions
//! - One client instance is shared by uploader and poller (pooled, cloneable)
//! - The upload call is never retried; job creation is not idempotent
//! - Poll failures abort the whole operation instead of retrying silently

pub mod client;
pub mod error;
pub mod poller;
pub mod types;
pub mod upload;

pub use client::CcClient;
pub use error::CcError;
pub use poller::JobPoller;
pub use types::{JobDescriptor, JobStatus};
pub use upload::DropletUploader;
