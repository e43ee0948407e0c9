//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a rendered HTML error page with an appropriate status code.
//!
//! Internal errors (database, template) are logged with full detail but the
//! client only ever sees the generic 500 page, so SQL and file paths never
//! leak to browsers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::render;

/// All errors that can occur in the fyyur-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Propagated from the SQLite (or other) store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A template failed to render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The caller referenced a resource that does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            ServerError::NotFound(resource) => {
                tracing::debug!(resource = %resource, "resource not found");
                render::error_page(StatusCode::NOT_FOUND)
            }
            ServerError::Database(e) => {
                error!(error = %e, "database error");
                render::error_page(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ServerError::Template(e) => {
                error!(error = %e, "template render error");
                render::error_page(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
