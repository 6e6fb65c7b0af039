//! Application error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application errors.
///
/// Authorization failures never appear here; guards resolve them with a
/// redirect before a handler runs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("template error")]
    Template(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Template(e) => tracing::error!(error = %e, "failed to render template"),
        }

        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_errors_are_opaque_500s() {
        let err = tera::Tera::default()
            .render("missing.html", &tera::Context::new())
            .map_err(AppError::from);
        let response = match err {
            Err(e) => e.into_response(),
            Ok(_) => panic!("rendering an unknown template should fail"),
        };
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
