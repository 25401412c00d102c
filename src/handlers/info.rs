use crate::{
    db,
    error::AppError,
    models::{VisitCount, VisitReport},
    AppState,
};
use askama::Template;
use axum::extract::{Path, State};
use std::sync::Arc;

#[derive(Template)]
#[template(path = "info.html")]
pub struct InfoTemplate {
    counts: Vec<VisitCount>,
}

#[derive(Template)]
#[template(path = "info_detail.html")]
pub struct InfoDetailTemplate {
    report: VisitReport,
}

/// GET /info/
/// Visit totals for every short url, oldest first.
pub async fn visit_counts(State(state): State<Arc<AppState>>) -> Result<InfoTemplate, AppError> {
    let counts = db::get_visit_counts(&state.db).await?;
    Ok(InfoTemplate { counts })
}

/// GET /info/:slug
/// Per-visit detail for one short url, most recent first.
pub async fn visit_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<InfoDetailTemplate, AppError> {
    tracing::debug!("Lookup on slug: {}", slug);
    let report = match db::get_visits(&state.db, &slug).await? {
        Some(r) => r,
        None => return Err(AppError::NotFound(slug)),
    };

    Ok(InfoDetailTemplate { report })
}
