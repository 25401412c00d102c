use crate::db::StoreError;
use axum::{
    extract::rejection::FormRejection,
    http::{header::InvalidHeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Every way a request can fail.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad or missing input.
    #[error("{0}")]
    Validation(String),

    #[error("Short url '/{0}' not found.")]
    NotFound(String),

    #[error("Error, the short url '{0}' is already in use.")]
    Conflict(String),

    /// Any query or I/O failure. The detail is logged, never shown.
    #[error("store failure: {0}")]
    Store(#[from] sqlx::Error),

    /// A stored URL that can't be sent as a `Location` header.
    #[error("url stored for '{slug}' is not a valid Location: {source}")]
    BadLocation {
        slug: String,
        source: InvalidHeaderValue,
    },
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateSlug(slug) => AppError::Conflict(slug),
            StoreError::Database(e) => AppError::Store(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Store(e) => {
                tracing::error!("Store failure: {:?}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response();
            }
            AppError::BadLocation { .. } => {
                tracing::error!("{}", self);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response();
            }
        };

        (status, self.to_string()).into_response()
    }
}
