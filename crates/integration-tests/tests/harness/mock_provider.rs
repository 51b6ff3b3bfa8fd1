//! Mock image generation backend for integration tests
//!
//! Implements `POST /v1/images/generations` in the OpenAI wire format and
//! records every request it receives

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Payload returned by [`Behavior::Image`] unless overridden
pub const MOCK_IMAGE_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

/// How the mock answers image requests
#[derive(Debug, Clone)]
pub enum Behavior {
    /// `200` with one `b64_json` image
    Image(String),
    /// `200` with an empty `data` array
    Empty,
    /// `200` with a hosted URL but no inline payload
    UrlOnly,
    /// `200` with the given JSON body as-is
    Reply(serde_json::Value),
    /// Non-2xx with the given JSON body
    Error(StatusCode, serde_json::Value),
    /// `200` with a body that is not JSON
    Garbage,
}

/// A request the mock received
#[derive(Debug, Clone)]
pub struct Received {
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

/// Mock provider that returns predictable responses
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    behavior: Behavior,
    request_count: AtomicU32,
    requests: Mutex<Vec<Received>>,
}

impl MockProvider {
    /// Start a mock that returns [`MOCK_IMAGE_B64`]
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(Behavior::Image(MOCK_IMAGE_B64.to_owned())).await
    }

    /// Start a mock with the given behavior
    pub async fn start_with(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            behavior,
            request_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/images/generations", routing::post(handle_images))
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

    /// Base URL for configuring the mock as the provider
    ///
    /// Includes `/v1` since the relay appends `/images/generations`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of image requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Most recent request, if any
    pub fn last_request(&self) -> Option<Received> {
        self.state.requests.lock().unwrap().last().cloned()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_images(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    state.requests.lock().unwrap().push(Received {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned),
        body,
    });

    match &state.behavior {
        Behavior::Image(b64) => Json(serde_json::json!({
            "created": 1_700_000_000,
            "data": [{ "b64_json": b64 }]
        }))
        .into_response(),
        Behavior::Empty => Json(serde_json::json!({ "created": 1_700_000_000, "data": [] })).into_response(),
        Behavior::UrlOnly => Json(serde_json::json!({
            "created": 1_700_000_000,
            "data": [{ "url": "https://images.example.com/abc.png" }]
        }))
        .into_response(),
        Behavior::Reply(body) => Json(body.clone()).into_response(),
        Behavior::Error(status, body) => (*status, Json(body.clone())).into_response(),
        Behavior::Garbage => (StatusCode::OK, "<html>not json</html>").into_response(),
    }
}
