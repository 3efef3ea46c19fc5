//! Droplet file server.
//!
//! Edge component for the platform control plane. It serves two routes: a
//! static file tree for assets staged on this host, and a droplet upload
//! endpoint that relays an application bundle to the cloud controller and
//! tracks the resulting asynchronous job until it reaches a terminal state.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client upload            ┌─────────────────────────────────────────┐
//!     ─────────────────────────┼─▶ http/server ──▶ cc/upload ────────────┼──▶ Cloud
//!                              │                       │                  │    Controller
//!                              │                       ▼                  │
//!                              │                   cc/poller ◀────────────┼──── job status
//!                              │                       │                  │
//!     Client response          │                       ▼                  │
//!     ◀────────────────────────┼───────────── cc/error (translate)       │
//!                              │                                          │
//!                              │   config · lifecycle · observability     │
//!                              └─────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod cc;
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use cc::CcError;
pub use config::FileServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
