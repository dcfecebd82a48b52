use std::sync::PoisonError;

use axum::response::{IntoResponse, Response};
use axum::{http::StatusCode, Json};
use tracing::error;

#[derive(Debug)]
pub enum AppError {
    Database(String),
    Internal(String),
    Unauthorized(&'static str),
    NotFound(&'static str),
    BadRequest(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(msg) => {
                error!(error = %msg, "store fault");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
            }
            AppError::Internal(msg) => {
                error!(error = %msg, "internal fault");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(message)).into_response()
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl<T> From<PoisonError<T>> for AppError {
    fn from(_: PoisonError<T>) -> Self {
        AppError::Database("connection lock poisoned".to_string())
    }
}
