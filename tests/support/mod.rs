// tests/support/mod.rs — In-process stub of the remote task API
//
// Speaks the same dialect as the real service: bearer-token auth on task
// endpoints, `{"detail": ...}` error envelopes (string or validation list),
// and an empty 200 body on delete.

#![allow(dead_code)]

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const VALID_TOKEN: &str = "tok-1";
pub const VALID_EMAIL: &str = "user@example.com";
pub const VALID_PASSWORD: &str = "hunter2rocks";

/// Logging in as this account yields a token with bytes that cannot be
/// carried in a cookie header.
pub const MALFORMED_TOKEN_EMAIL: &str = "broken@example.com";

#[derive(Clone)]
struct StubState {
    hits: Arc<AtomicUsize>,
}

/// Start the stub on an ephemeral port. Returns the base URL (including the
/// `/api/v1` prefix) and a counter of requests that reached the server.
pub async fn spawn_stub() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = StubState { hits: hits.clone() };

    let router = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/v1/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(middleware::from_fn_with_state(state.clone(), count_hits))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}/api/v1"), hits)
}

async fn count_hits(State(state): State<StubState>, request: Request, next: Next) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {VALID_TOKEN}");
    headers.get("authorization").and_then(|v| v.to_str().ok()) == Some(expected.as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Not authenticated"})),
    )
        .into_response()
}

async fn login(Json(body): Json<serde_json::Value>) -> Response {
    if body["email"] == MALFORMED_TOKEN_EMAIL && body["password"] == VALID_PASSWORD {
        Json(json!({"access_token": "tok\nwith-newline"})).into_response()
    } else if body["email"] == VALID_EMAIL && body["password"] == VALID_PASSWORD {
        Json(json!({"access_token": VALID_TOKEN})).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn signup(Json(body): Json<serde_json::Value>) -> Response {
    let password = body["password"].as_str().unwrap_or_default();
    if password.len() >= 8 {
        (
            StatusCode::CREATED,
            Json(json!({"id": "7", "email": body["email"]})),
        )
            .into_response()
    } else {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"msg": "field required"}, {"msg": "too short"}]})),
        )
            .into_response()
    }
}

async fn list_tasks(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {"id": "1", "title": "Buy milk", "description": "2%", "completed": false},
        {"id": "boom", "title": "Call plumber", "description": "", "completed": false},
        {"id": "2", "title": "Walk dog", "description": "", "completed": true},
    ]))
    .into_response()
}

async fn create_task(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if body["title"].as_str().unwrap_or_default().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"msg": "field required"}]})),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "id": "42",
            "title": body["title"],
            "description": body["description"],
            "completed": false,
        })),
    )
        .into_response()
}

async fn get_task(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id == "garbage" {
        // 2xx with a body that is not JSON
        return "not json".into_response();
    }
    Json(json!({"id": id, "title": "Buy milk", "description": "2%", "completed": false}))
        .into_response()
}

async fn update_task(
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id == "boom" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "kaboom"})),
        )
            .into_response();
    }
    Json(json!({
        "id": id,
        "title": body["title"].as_str().unwrap_or("Buy milk"),
        "description": body["description"].as_str().unwrap_or(""),
        "completed": body["completed"].as_bool().unwrap_or(false),
    }))
    .into_response()
}

async fn delete_task(headers: HeaderMap, Path(_id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    // Success with an empty body, like the real service.
    StatusCode::OK.into_response()
}
