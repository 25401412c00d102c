#![allow(dead_code)]

use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Request, Response},
    Router,
};
use shorty::{config::AppConfig, db, AppState};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tower::ServiceExt;

pub const FIREFOX_LINUX: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

/// A fresh, migrated in-memory database. A single connection that never
/// expires keeps every query on the same database.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    db::migrate(&pool).await.unwrap();
    pool
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        db_max_connections: 1,
        host: "127.0.0.1".into(),
        port: 8080,
        base_url: "http://sho.rt".into(),
        slug_length: 7,
        trust_proxy_headers: false,
    }
}

pub fn test_app(pool: SqlitePool) -> Router {
    shorty::router(Arc::new(AppState {
        db: pool,
        config: test_config(),
    }))
}

fn with_peer(mut req: Request<Body>) -> Request<Body> {
    let addr: SocketAddr = "203.0.113.7:54321".parse().unwrap();
    req.extensions_mut().insert(ConnectInfo(addr));
    req
}

pub async fn get(app: &Router, path: &str) -> Response<Body> {
    let req = Request::get(path)
        .header(header::USER_AGENT, FIREFOX_LINUX)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(with_peer(req)).await.unwrap()
}

pub async fn post_form(app: &Router, path: &str, form: &str) -> Response<Body> {
    let req = Request::post(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_owned()))
        .unwrap();
    app.clone().oneshot(with_peer(req)).await.unwrap()
}

/// POST with a raw body and no Content-Type.
pub async fn post_raw(app: &Router, path: &str, body: &str) -> Response<Body> {
    let req = Request::post(path)
        .body(Body::from(body.to_owned()))
        .unwrap();
    app.clone().oneshot(with_peer(req)).await.unwrap()
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
