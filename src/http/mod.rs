//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, upload handler)
//!     → routes.rs (enumerated route table, built at startup)
//!     → cc subsystem (upload relay + job polling)
//!     → response translated from the job outcome
//! ```

pub mod routes;
pub mod server;

pub use routes::Route;
pub use server::HttpServer;
