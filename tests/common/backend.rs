//! In-process stand-in for the remote snippet backend
//!
//! Speaks the same wire protocol as the real REST service: bearer-token
//! auth, camelCase JSON, and the same mix of error body shapes. Keeps
//! call counters so tests can assert which requests never left the app.

use super::constants::*;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use serde_json::json;
use snipdash::api::Snippet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct StubState {
    snippets: Arc<Mutex<Vec<Snippet>>>,
    login_calls: Arc<AtomicUsize>,
    list_calls: Arc<AtomicUsize>,
    create_calls: Arc<AtomicUsize>,
    fail_lists: Arc<AtomicBool>,
}

/// Stub backend instance listening on a random port
///
/// When dropped, the server gracefully shuts down.
pub struct StubBackend {
    /// Base URL to point the app (or an `ApiClient`) at
    pub base_url: String,

    state: StubState,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl StubBackend {
    /// Spawns a fresh stub with no stored snippets.
    ///
    /// # Panics
    ///
    /// Panics if port binding fails or the server fails to start.
    pub async fn spawn() -> Self {
        let state = StubState::default();

        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/snippets", get(list_snippets).post(create_snippet))
            .route("/snippets/{id}", get(get_snippet).delete(delete_snippet))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend to random port");
        let addr = listener
            .local_addr()
            .expect("Failed to get stub backend address");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Stub backend failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Snapshot of the snippets the stub currently stores.
    pub fn snippets(&self) -> Vec<Snippet> {
        self.state.snippets.lock().unwrap().clone()
    }

    /// How many login requests reached the stub.
    pub fn login_calls(&self) -> usize {
        self.state.login_calls.load(Ordering::SeqCst)
    }

    /// How many list requests reached the stub.
    pub fn list_calls(&self) -> usize {
        self.state.list_calls.load(Ordering::SeqCst)
    }

    /// How many create requests reached the stub.
    pub fn create_calls(&self) -> usize {
        self.state.create_calls.load(Ordering::SeqCst)
    }

    /// Makes every subsequent list request fail with a 500.
    pub fn fail_lists(&self, fail: bool) {
        self.state.fail_lists.store(fail, Ordering::SeqCst);
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct CreateRequest {
    text: String,
}

async fn login(State(state): State<StubState>, Json(body): Json<LoginRequest>) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);

    if body.username == TEST_USER && body.password == TEST_PASS {
        Json(json!({ "token": TEST_TOKEN, "expiresIn": "24h" })).into_response()
    } else {
        // Nested shape, as the real backend sends it
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "message": "Invalid credentials" } })),
        )
            .into_response()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TEST_TOKEN}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Invalid or expired token" })),
    )
        .into_response()
}

async fn list_snippets(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.list_calls.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return unauthorized();
    }
    if state.fail_lists.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Storage unavailable" })),
        )
            .into_response();
    }

    let snippets = state.snippets.lock().unwrap().clone();
    Json(snippets).into_response()
}

async fn create_snippet(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<CreateRequest>,
) -> Response {
    state.create_calls.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return unauthorized();
    }
    if body.text == FAILING_TEXT {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Summarizer unavailable" })),
        )
            .into_response();
    }

    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .expect("format timestamp");
    let snippet = Snippet {
        id: uuid::Uuid::new_v4().to_string(),
        text: body.text.clone(),
        summary: format!("Summary of: {}", body.text),
        created_at: now.clone(),
        updated_at: now,
    };
    state.snippets.lock().unwrap().push(snippet.clone());

    (StatusCode::CREATED, Json(snippet)).into_response()
}

async fn get_snippet(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let snippets = state.snippets.lock().unwrap();
    match snippets.iter().find(|snippet| snippet.id == id) {
        Some(snippet) => Json(snippet.clone()).into_response(),
        // Top-level message shape, no "error" key
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Snippet not found" })),
        )
            .into_response(),
    }
}

async fn delete_snippet(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let mut snippets = state.snippets.lock().unwrap();
    let before = snippets.len();
    snippets.retain(|snippet| snippet.id != id);

    if snippets.len() == before {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Snippet not found" })),
        )
            .into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}
