use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use store::StoreError;

use auth::AuthError;

/// Server-side failures of a handler. Details are logged, never shown to the visitor.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong. Please try again later.",
        )
            .into_response()
    }
}
