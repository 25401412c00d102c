use crate::{db, error::AppError, tracker, AppState};
use axum::{
    extract::{ConnectInfo, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::{net::SocketAddr, sync::Arc};

/// GET /:slug
///
/// 1. Look the slug up (unknown → 404) and build the `Location` header
///    (unusable URL → 500, nothing recorded).
/// 2. Record the visit. This is best-effort: a failed write is logged and
///    the visitor is redirected anyway.
/// 3. Return a 307 redirect to the stored URL.
pub async fn redirect(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let url = match db::get_url_by_slug(&state.db, &slug).await? {
        Some(u) => u,
        None => return Err(AppError::NotFound(slug)),
    };

    let location = match HeaderValue::try_from(url.url.as_str()) {
        Ok(v) => v,
        Err(source) => return Err(AppError::BadLocation { slug, source }),
    };

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let ip = tracker::resolve_ip(&headers, addr, state.config.trust_proxy_headers);

    tracker::track_visit(&state.db, url.id, user_agent, &ip).await;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}
