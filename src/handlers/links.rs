use crate::{db, error::AppError, slugs, AppState};
use askama::Template;
use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Template)]
#[template(path = "created.html")]
struct CreatedTemplate {
    short_url: String,
    slug: String,
    url: String,
}

#[derive(Deserialize)]
pub struct NewLinkForm {
    url: Option<String>,
    slug: Option<String>,
}

/// POST /new
///
/// A missing slug is replaced by a random one. Collisions, requested or
/// generated, are reported as 409; nothing is retried.
pub async fn create_link(
    State(state): State<Arc<AppState>>,
    form: Result<Form<NewLinkForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;
    let url = form.url.as_deref().map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return Err(AppError::Validation("Must include a URL.".into()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::Validation(
            "URL must begin with 'http://' or 'https://'.".into(),
        ));
    }
    // Stored URLs go out verbatim in the Location header
    if url.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(AppError::Validation(
            "URL must not contain whitespace or control characters.".into(),
        ));
    }

    let slug = match form.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(requested) => {
            slugs::validate_requested(requested).map_err(|msg| AppError::Validation(msg.into()))?;
            requested.to_owned()
        }
        None => slugs::random(state.config.slug_length),
    };

    tracing::debug!("Requested '{}' link to '{}'", slug, url);
    let saved = db::save_new_url(&state.db, &slug, url).await?;
    tracing::info!("Created short url '{}' (id {})", saved.slug, saved.id);

    let tmpl = CreatedTemplate {
        short_url: format!("{}/{}", state.config.base_url, saved.slug),
        slug: saved.slug,
        url: saved.url,
    };

    Ok((StatusCode::CREATED, tmpl).into_response())
}
