use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{Redirect, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod slugs;
pub mod tracker;

// ── Shared application state ───────────────────────────────────────────────

/// Everything a handler needs. Built once at startup and handed to [`router`].
pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub config: config::AppConfig,
}

// ── Router ─────────────────────────────────────────────────────────────────

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home::index))
        .route("/health", get(|| async { StatusCode::OK }))
        .route("/new", post(handlers::links::create_link))
        .route("/info", get(|| async { Redirect::permanent("/info/") }))
        .route("/info/", get(handlers::info::visit_counts))
        .route("/info/:slug", get(handlers::info::visit_detail))
        // Short-link redirect: static routes above take priority
        .route("/:slug", get(handlers::redirect::redirect))
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Log every request before its handler runs.
async fn log_request(req: Request, next: Next) -> Response {
    tracing::info!("{} {}", req.method(), req.uri().path());
    next.run(req).await
}
