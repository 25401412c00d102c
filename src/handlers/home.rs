use crate::AppState;
use askama::Template;
use axum::extract::State;
use std::sync::Arc;

/// Slugs linked from the home page for manual testing. The last one is
/// expected to 404.
const DEBUG_SLUGS: &[&str] = &["goog", "twitter", "fb", "foo"];

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    base_url: String,
    debug_slugs: Vec<&'static str>,
}

/// GET /
/// Creation form, a link to the stats page and some debug links.
pub async fn index(State(state): State<Arc<AppState>>) -> IndexTemplate {
    IndexTemplate {
        base_url: state.config.base_url.clone(),
        debug_slugs: DEBUG_SLUGS.to_vec(),
    }
}
