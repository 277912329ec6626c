//! Mock transcription endpoint for integration tests
//!
//! Accepts `multipart/form-data` uploads on `/v1/audio/transcriptions`,
//! records every part it receives, and answers with a canned body

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// One multipart part as seen by the endpoint
#[derive(Debug, Clone)]
pub struct RecordedPart {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl RecordedPart {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

struct MockState {
    status: StatusCode,
    body: String,
    parts: Mutex<Vec<RecordedPart>>,
    authorization: Mutex<Option<String>>,
}

/// Mock endpoint that returns a fixed status and body
pub struct MockEndpoint {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockEndpoint {
    /// Start a mock that answers 200 with the given JSON body
    pub async fn start(body: &str) -> anyhow::Result<Self> {
        Self::start_with_status(StatusCode::OK, body).await
    }

    /// Start a mock that answers with the given status and body
    pub async fn start_with_status(status: StatusCode, body: &str) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            status,
            body: body.to_owned(),
            parts: Mutex::new(Vec::new()),
            authorization: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL including `/v1`, as the transcriber appends `/audio/transcriptions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Parts of the last request, in the order they arrived
    pub fn parts(&self) -> Vec<RecordedPart> {
        self.state.parts.lock().unwrap().clone()
    }

    /// `Authorization` header of the last request
    pub fn authorization(&self) -> Option<String> {
        self.state.authorization.lock().unwrap().clone()
    }
}

impl Drop for MockEndpoint {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcription(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut parts = Vec::new();

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();

        parts.push(RecordedPart {
            name,
            filename,
            content_type,
            data,
        });
    }

    *state.parts.lock().unwrap() = parts;
    *state.authorization.lock().unwrap() = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}
