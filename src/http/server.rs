//! HTTP server setup and the droplet upload handler.
//!
//! # Responsibilities
//! - Create the Axum router from the enumerated route table
//! - Wire up middleware (tracing)
//! - Validate the inbound upload request (Content-Length present)
//! - Stream the droplet to the cloud controller and track the job
//! - Translate the job outcome into the response status
//!
//! # Design Decisions
//! - The upload body is streamed end to end; it is never buffered here
//! - No request timeout wraps the upload route: the poll budget inside
//!   the cc subsystem is the only bound on a slow controller
//! - The poll loop runs inside the handler future, so a client disconnect
//!   drops it at the next await point

use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{services::ServeDir, trace::TraceLayer};
use uuid::Uuid;

use crate::cc::upload::CONTENT_MD5;
use crate::cc::{CcClient, CcError, DropletUploader, JobPoller};
use crate::config::FileServerConfig;
use crate::http::routes::Route;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub uploader: DropletUploader,
    pub poller: JobPoller,
}

/// HTTP server for the file server.
pub struct HttpServer {
    router: Router,
    config: FileServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: FileServerConfig) -> Result<Self, CcError> {
        let client = CcClient::new(&config.cc)?;
        let uploader = DropletUploader::new(client.clone());
        let poller = JobPoller::new(
            client,
            config.cc.polling_interval(),
            config.cc.poll_timeout(),
        );

        let state = AppState { uploader, poller };
        let router = Self::build_router(&config, state);

        Ok(Self { router, config })
    }

    /// Build the Axum router from the enumerated route table.
    fn build_router(config: &FileServerConfig, state: AppState) -> Router {
        let mut router = Router::new();
        for route in Route::ALL {
            router = match route {
                Route::UploadDroplet => router.route(route.path(), post(upload_droplet)),
                Route::StaticFiles => {
                    router.nest_service(route.path(), ServeDir::new(&config.static_files.root))
                }
            };
        }
        router.with_state(state).layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FileServerConfig {
        &self.config
    }
}

/// Droplet upload handler.
///
/// Validates the request, relays the body to the cloud controller, waits
/// for the job, and answers with the translated outcome.
async fn upload_droplet(
    State(state): State<AppState>,
    Path(app_guid): Path<String>,
    request: Request,
) -> Response {
    let request_id = Uuid::new_v4();

    tracing::debug!(
        request_id = %request_id,
        app_guid = %app_guid,
        "Handling droplet upload"
    );

    let outcome = relay_droplet(&state, &app_guid, request).await;

    match outcome {
        Ok(()) => {
            metrics::record_upload_request(StatusCode::CREATED.as_u16());
            StatusCode::CREATED.into_response()
        }
        Err(error) => {
            let status = error.status_code();
            tracing::warn!(
                request_id = %request_id,
                app_guid = %app_guid,
                error = %error,
                status = status.as_u16(),
                "Droplet upload failed"
            );
            metrics::record_upload_request(status.as_u16());
            error.into_response()
        }
    }
}

/// Upload the droplet and wait for the resulting job to complete.
async fn relay_droplet(state: &AppState, app_guid: &str, request: Request) -> Result<(), CcError> {
    let content_length = content_length(request.headers())?;
    let content_md5 = request.headers().get(CONTENT_MD5).cloned();

    let droplet = reqwest::Body::wrap_stream(request.into_body().into_data_stream());
    let (job, initial_status) = state
        .uploader
        .upload(app_guid, content_length, content_md5, droplet)
        .await?;

    state.poller.await_completion(&job, initial_status).await
}

/// Extract a positive Content-Length, required before any outbound call.
fn content_length(headers: &HeaderMap) -> Result<u64, CcError> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value: &HeaderValue| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|length| *length > 0)
        .ok_or(CcError::MissingContentLength)
}
