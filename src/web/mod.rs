// src/web/mod.rs — Web UI shell: router, shared state, navigation guard layer

pub mod pages;
pub mod templates;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::client::ApiClient;
use crate::guard::{NavigationGuard, RouteDecision};
use crate::infra::config::Config;
use crate::session::{self, SessionStore};

/// Shared state for page handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub guard: Arc<NavigationGuard>,
    pub templates: Arc<minijinja::Environment<'static>>,
    /// One reqwest client per process; cloning shares the connection pool.
    http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let guard = Arc::new(NavigationGuard::new(config.auth.skip_auth));
        Ok(Self {
            config: Arc::new(config),
            guard,
            templates: Arc::new(templates::environment()?),
            http: reqwest::Client::new(),
        })
    }

    /// Gateway bound to one request's session store.
    pub fn client_for(&self, session: Arc<dyn SessionStore>) -> ApiClient {
        ApiClient::new(
            self.config.base_url(),
            self.http.clone(),
            session,
            self.config.auth.skip_auth,
        )
    }
}

/// Build the axum router with the guard layered ahead of every route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(pages::login_form).post(pages::login_submit))
        .route("/signup", get(pages::signup_form).post(pages::signup_submit))
        .route("/tasks", get(pages::tasks_page).post(pages::create_task))
        .route("/tasks/{id}", post(pages::edit_task))
        .route("/tasks/{id}/toggle", post(pages::toggle_task))
        .route("/tasks/{id}/delete", post(pages::delete_task))
        .route("/logout", post(pages::logout))
        .nest_service("/static", ServeDir::new("static"))
        .layer(middleware::from_fn_with_state(state.clone(), guard_layer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs before any page logic: reads credential presence from the
/// transport-level `Cookie` header (never application memory) and applies
/// the navigation policy.
async fn guard_layer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let authenticated = cookie_token(request.headers()).is_some();

    match state.guard.evaluate(&path, authenticated) {
        RouteDecision::Allow => next.run(request).await,
        RouteDecision::RedirectHome => Redirect::to("/").into_response(),
        RouteDecision::RedirectLogin => Redirect::to("/login").into_response(),
    }
}

pub(crate) fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(session::token_from_cookie_header)
}

/// Start the web UI on the configured bind address (blocking).
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.server.bind.clone();
    let router = build_router(state);

    tracing::info!("taskdeck listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
