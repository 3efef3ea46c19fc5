//! Metrics collection and exposition.
//!
//! # Metrics
//! - `file_server_requests_total` (counter): upload requests by status code
//! - `file_server_job_polls_total` (counter): poll calls by observed status
//! - `file_server_unknown_job_statuses_total` (counter): statuses the
//!   poller did not recognize, labeled with the raw value
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op, so tests and
//!   library consumers pay nothing
//! - Unknown job statuses get their own counter so forward-compatibility
//!   holes show up in dashboards instead of only in logs

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::cc::JobStatus;

/// Install the Prometheus exporter on the given address.
///
/// Must run inside the tokio runtime; the exporter serves scrapes from a
/// background task.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "failed to install metrics exporter"),
    }
}

/// Count one completed upload request by outgoing status code.
pub fn record_upload_request(status: u16) {
    counter!("file_server_requests_total", "status" => status.to_string()).increment(1);
}

/// Count one job status poll by the status it observed.
pub fn record_job_poll(status: &JobStatus) {
    counter!("file_server_job_polls_total", "status" => status.to_string()).increment(1);
}

/// Count a poll that returned a status outside the known set.
pub fn record_unknown_job_status(raw: &str) {
    counter!("file_server_unknown_job_statuses_total", "raw" => raw.to_string()).increment(1);
}
