//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the file
//! server. All types derive Serde traits for deserialization from config
//! files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the file server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FileServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Static file serving configuration.
    pub static_files: StaticFilesConfig,

    /// Cloud controller (backend) configuration.
    pub cc: CloudControllerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory whose contents are served under the static route.
    pub root: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: "./static".to_string(),
        }
    }
}

/// Cloud controller configuration.
///
/// Covers the upload-creation endpoint and the job status polling loop.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CloudControllerConfig {
    /// Base address of the cloud controller (e.g., "http://127.0.0.1:9022").
    pub address: String,

    /// Basic auth username for outbound calls.
    pub username: String,

    /// Basic auth password for outbound calls.
    pub password: String,

    /// Wait between consecutive job status polls, in milliseconds.
    pub job_polling_interval_ms: u64,

    /// Upper bound on the total time spent polling one job, in seconds.
    /// Expiry is reported as a poll timeout, not a job failure.
    pub job_poll_timeout_secs: u64,

    /// Skip TLS certificate verification for outbound calls.
    pub skip_cert_verify: bool,
}

impl Default for CloudControllerConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:9022".to_string(),
            username: String::new(),
            password: String::new(),
            job_polling_interval_ms: 1000,
            job_poll_timeout_secs: 300,
            skip_cert_verify: false,
        }
    }
}

impl CloudControllerConfig {
    /// Wait between consecutive polls of the same job.
    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.job_polling_interval_ms)
    }

    /// Total budget for the polling loop of one job.
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.job_poll_timeout_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
