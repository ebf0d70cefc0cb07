// src/web/pages.rs — Page handlers
//
// Every handler builds a per-request `CookieSession` from the incoming
// headers, runs the gateway through it, and translates `AuthRequired` into
// session teardown (clear cookie, back to login). Other failures re-render
// the page with a user-visible message; nothing is silently dropped.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use minijinja::context;
use serde::Deserialize;
use std::sync::Arc;

use super::{cookie_token, AppState};
use crate::board::TaskBoard;
use crate::client::types::{Credentials, TaskDraft, TaskPatch};
use crate::client::ApiClient;
use crate::infra::errors::ApiError;
use crate::session::{self, CookieChange, CookieSession, SessionStore};

// ─── Shared plumbing ────────────────────────────────────────────────────────

fn request_session(headers: &HeaderMap) -> Arc<CookieSession> {
    let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
    Arc::new(CookieSession::from_cookie_header(cookie))
}

/// Drain the session's pending cookie change into a `Set-Cookie` header.
///
/// A token the remote API returns with non-header-safe bytes cannot be
/// stored; proceeding would land the user on a protected page without a
/// credential, so that case surfaces as a login error instead.
fn apply_cookie(state: &AppState, session: &CookieSession, mut response: Response) -> Response {
    if let Some(change) = session.take_change() {
        let secure = state.config.auth.secure_cookies;
        let value = match change {
            CookieChange::Set(token) => session::set_cookie_value(&token, secure),
            CookieChange::Clear => session::clear_cookie_value(secure),
        };
        match HeaderValue::from_str(&value) {
            Ok(header_value) => {
                response
                    .headers_mut()
                    .append(header::SET_COOKIE, header_value);
            }
            Err(e) => {
                tracing::warn!("session cookie rejected: {e}");
                return render(
                    state,
                    "login.html",
                    context! {
                        authenticated => false,
                        error => "Session could not be established",
                    },
                );
            }
        }
    }
    response
}

fn render(state: &AppState, name: &str, ctx: minijinja::Value) -> Response {
    match state
        .templates
        .get_template(name)
        .and_then(|t| t.render(ctx))
    {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("template {name} failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

fn render_board(state: &AppState, board: &TaskBoard) -> Response {
    render(
        state,
        "tasks.html",
        context! {
            authenticated => true,
            error => board.error(),
            pending => board.pending().collect::<Vec<_>>(),
            completed => board.completed().collect::<Vec<_>>(),
        },
    )
}

/// `AuthRequired` teardown: the gateway never mutates the session, so the
/// caller clears the credential and sends the user back to login.
fn teardown(state: &AppState, session: &CookieSession) -> Response {
    session.clear();
    apply_cookie(state, session, Redirect::to("/login").into_response())
}

/// Fetch the current list so an action failure can still render the page,
/// with the failure surfaced once as the board error.
async fn board_with_error(client: &ApiClient, message: String) -> TaskBoard {
    let mut board = match client.list_tasks().await {
        Ok(tasks) => TaskBoard::new(tasks),
        Err(_) => TaskBoard::default(),
    };
    board.set_error(message);
    board
}

// ─── Public pages ───────────────────────────────────────────────────────────

pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let authenticated = cookie_token(&headers).is_some() || state.config.auth.skip_auth;
    render(&state, "home.html", context! { authenticated })
}

pub async fn login_form(State(state): State<AppState>) -> Response {
    render(&state, "login.html", context! { authenticated => false })
}

pub async fn signup_form(State(state): State<AppState>) -> Response {
    render(&state, "signup.html", context! { authenticated => false })
}

#[derive(Deserialize)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
}

pub async fn login_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AuthForm>,
) -> Response {
    let session = request_session(&headers);
    let client = state.client_for(session.clone());
    let credentials = Credentials {
        email: form.email,
        password: form.password,
    };

    match client.login(&credentials).await {
        Ok(token) => {
            session.set(&token.access_token);
            apply_cookie(&state, &session, Redirect::to("/tasks").into_response())
        }
        Err(e) => render(
            &state,
            "login.html",
            context! { authenticated => false, error => e.to_string() },
        ),
    }
}

pub async fn signup_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AuthForm>,
) -> Response {
    let session = request_session(&headers);
    let client = state.client_for(session);
    let credentials = Credentials {
        email: form.email,
        password: form.password,
    };

    match client.signup(&credentials).await {
        Ok(_) => Redirect::to("/login").into_response(),
        Err(e) => render(
            &state,
            "signup.html",
            context! { authenticated => false, error => e.to_string() },
        ),
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = request_session(&headers);
    session.clear();
    apply_cookie(&state, &session, Redirect::to("/").into_response())
}

// ─── Task pages ─────────────────────────────────────────────────────────────

pub async fn tasks_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = request_session(&headers);
    let client = state.client_for(session.clone());

    match client.list_tasks().await {
        Ok(tasks) => render_board(&state, &TaskBoard::new(tasks)),
        Err(e) if e.is_auth_required() => teardown(&state, &session),
        Err(e) => {
            let mut board = TaskBoard::default();
            board.set_error(e.to_string());
            render_board(&state, &board)
        }
    }
}

#[derive(Deserialize)]
pub struct TaskForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

pub async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<TaskForm>,
) -> Response {
    let session = request_session(&headers);
    let client = state.client_for(session.clone());
    let draft = TaskDraft::new(form.title, form.description);

    match client.create_task(&draft).await {
        Ok(_) => Redirect::to("/tasks").into_response(),
        Err(e) if e.is_auth_required() => teardown(&state, &session),
        Err(e) => {
            let board = board_with_error(&client, e.to_string()).await;
            render_board(&state, &board)
        }
    }
}

#[derive(Deserialize)]
pub struct EditForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Current completion flag, carried through the form unchanged.
    #[serde(default)]
    pub completed: String,
}

pub async fn edit_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<EditForm>,
) -> Response {
    let session = request_session(&headers);
    let client = state.client_for(session.clone());
    let patch = TaskPatch::edit(form.title, form.description, form.completed == "true");

    match client.update_task(&id, &patch).await {
        Ok(_) => Redirect::to("/tasks").into_response(),
        Err(e) if e.is_auth_required() => teardown(&state, &session),
        Err(e) => {
            let board = board_with_error(&client, e.to_string()).await;
            render_board(&state, &board)
        }
    }
}

pub async fn toggle_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let session = request_session(&headers);
    let client = state.client_for(session.clone());

    let mut board = match client.list_tasks().await {
        Ok(tasks) => TaskBoard::new(tasks),
        Err(e) if e.is_auth_required() => return teardown(&state, &session),
        Err(e) => {
            let mut board = TaskBoard::default();
            board.set_error(e.to_string());
            return render_board(&state, &board);
        }
    };

    // Optimistic update: flip locally before the network call.
    let Some(next) = board.toggle(&id) else {
        board.set_error(format!("Task '{id}' not found"));
        return render_board(&state, &board);
    };

    match client.update_task(&id, &TaskPatch::completed(next)).await {
        Ok(_) => Redirect::to("/tasks").into_response(),
        Err(ApiError::AuthRequired) => teardown(&state, &session),
        Err(e) => {
            // Revert to the pre-toggle value and surface the failure.
            board.revert(&id, !next);
            board.set_error(e.to_string());
            render_board(&state, &board)
        }
    }
}

pub async fn delete_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let session = request_session(&headers);
    let client = state.client_for(session.clone());

    match client.delete_task(&id).await {
        Ok(()) => Redirect::to("/tasks").into_response(),
        Err(e) if e.is_auth_required() => teardown(&state, &session),
        Err(e) => {
            let board = board_with_error(&client, e.to_string()).await;
            render_board(&state, &board)
        }
    }
}
