//! Shared utilities for integration testing.
//!
//! Provides a programmable fake cloud controller plus a helper that boots
//! a real file server wired to it.

// Not every test binary exercises every helper.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::extract::{Multipart, Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use file_server::config::FileServerConfig;
use file_server::{HttpServer, Shutdown};

/// What the fake controller answers to one poll request.
#[derive(Debug, Clone)]
pub enum PollReply {
    /// 200 with a well-formed job body carrying this status.
    Status(&'static str),
    /// A bare HTTP error with no job body.
    HttpError(u16),
}

/// Everything the fake controller captured about the upload call.
#[derive(Debug, Default, Clone)]
pub struct RecordedUpload {
    pub app_guid: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_md5: Option<String>,
    pub content_length: Option<u64>,
    pub field_name: Option<String>,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
pub struct FakeCcState {
    /// (status, body) answered to the upload call.
    upload_reply: Mutex<(u16, String)>,
    /// Scripted poll replies, consumed front to back.
    poll_replies: Mutex<VecDeque<PollReply>>,
    /// Answered once the script runs out; a bare 500 otherwise.
    default_poll_status: Mutex<Option<&'static str>>,
    received_requests: AtomicU32,
    upload: Mutex<Option<RecordedUpload>>,
    poll_times: Mutex<Vec<Instant>>,
}

/// Programmable stand-in for the cloud controller.
pub struct FakeCloudController {
    pub addr: SocketAddr,
    state: Arc<FakeCcState>,
}

impl FakeCloudController {
    pub async fn start() -> Self {
        let state = Arc::new(FakeCcState::default());
        let router = Router::new()
            .route("/staging/droplets/{app_guid}/upload", post(handle_upload))
            .route("/v2/jobs/{job_guid}", get(handle_poll))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_upload_reply(&self, status: u16, body: impl Into<String>) {
        *self.state.upload_reply.lock().unwrap() = (status, body.into());
    }

    pub fn script_polls(&self, replies: impl IntoIterator<Item = PollReply>) {
        self.state
            .poll_replies
            .lock()
            .unwrap()
            .extend(replies.into_iter());
    }

    /// Keep answering this status once the scripted replies run out.
    pub fn set_default_poll_status(&self, status: &'static str) {
        *self.state.default_poll_status.lock().unwrap() = Some(status);
    }

    pub fn received_requests(&self) -> u32 {
        self.state.received_requests.load(Ordering::SeqCst)
    }

    pub fn recorded_upload(&self) -> RecordedUpload {
        self.state
            .upload
            .lock()
            .unwrap()
            .clone()
            .expect("no upload recorded")
    }

    pub fn poll_times(&self) -> Vec<Instant> {
        self.state.poll_times.lock().unwrap().clone()
    }
}

/// JSON body shared by the upload and status endpoints.
pub fn polling_response_body(job_guid: &str, status: &str, base_url: &str) -> String {
    serde_json::json!({
        "metadata": {
            "guid": job_guid,
            "url": format!("{}/v2/jobs/{}", base_url, job_guid),
        },
        "entity": { "status": status },
    })
    .to_string()
}

async fn handle_upload(
    State(state): State<Arc<FakeCcState>>,
    Path(app_guid): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    state.received_requests.fetch_add(1, Ordering::SeqCst);

    let mut recorded = RecordedUpload {
        app_guid,
        query,
        authorization: header_string(&headers, "authorization"),
        content_md5: header_string(&headers, "content-md5"),
        content_length: header_string(&headers, "content-length").and_then(|v| v.parse().ok()),
        ..RecordedUpload::default()
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        recorded.field_name = field.name().map(str::to_string);
        recorded.file_name = field.file_name().map(str::to_string);
        recorded.bytes = field.bytes().await.unwrap().to_vec();
    }

    *state.upload.lock().unwrap() = Some(recorded);

    let (status, body) = state.upload_reply.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), body)
}

async fn handle_poll(
    State(state): State<Arc<FakeCcState>>,
    Path(job_guid): Path<String>,
) -> (StatusCode, String) {
    state.received_requests.fetch_add(1, Ordering::SeqCst);
    state.poll_times.lock().unwrap().push(Instant::now());

    let reply = state.poll_replies.lock().unwrap().pop_front();
    match reply {
        Some(PollReply::Status(status)) => (
            StatusCode::OK,
            polling_response_body(&job_guid, status, ""),
        ),
        Some(PollReply::HttpError(status)) => {
            (StatusCode::from_u16(status).unwrap(), String::new())
        }
        None => match *state.default_poll_status.lock().unwrap() {
            Some(status) => (
                StatusCode::OK,
                polling_response_body(&job_guid, status, ""),
            ),
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "no more poll fixtures".to_string(),
            ),
        },
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Boot a real file server pointed at the fake controller.
///
/// Returns the bound address and the shutdown handle keeping it alive.
pub async fn start_file_server(config: FileServerConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Config pointed at the fake controller, tuned for fast tests.
pub fn test_config(cc_url: &str, interval_ms: u64) -> FileServerConfig {
    let mut config = FileServerConfig::default();
    config.cc.address = cc_url.to_string();
    config.cc.username = "bob".into();
    config.cc.password = "password".into();
    config.cc.job_polling_interval_ms = interval_ms;
    config.cc.job_poll_timeout_secs = 10;
    config
}
