//! Mapping of board errors onto HTTP responses.

use std::num::ParseIntError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use murmur::BoardError;
use thiserror::Error;
use tracing::error;

/// Errors a request handler can return.
#[derive(Debug, Error)]
pub enum AppError {
    /// The board refused or failed the operation.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// The post id in the path is not an integer.
    #[error("invalid post id: {0}")]
    BadId(#[source] ParseIntError),

    /// A template failed to render.
    #[error("render error: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Board(BoardError::PostNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Board(BoardError::Store(_)) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Board(_) | AppError::BadId(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
            return (status, "internal server error").into_response();
        }
        (status, self.to_string()).into_response()
    }
}
