//! Route table for the file server.
//!
//! # Design Decisions
//! - Routes are an enumerated set; the axum router is constructed from it
//!   once at startup and injected into the server assembly, so no global
//!   routing state exists
//! - Path parameter syntax follows axum 0.8 (`{param}`)

/// Enumerated set of routes served by this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Droplet upload relay for one application.
    UploadDroplet,
    /// Static assets staged on this host.
    StaticFiles,
}

impl Route {
    /// Every route the server mounts, in registration order.
    pub const ALL: [Route; 2] = [Route::UploadDroplet, Route::StaticFiles];

    /// Path pattern the route is mounted at.
    pub fn path(self) -> &'static str {
        match self {
            Route::UploadDroplet => "/v1/droplet/{app_guid}",
            Route::StaticFiles => "/v1/static",
        }
    }
}
