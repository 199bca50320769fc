//! Transport errors and their JSON responses.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::common::Error;

/// Error body read by the client.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request's content is at fault
    #[error("{0}")]
    BadRequest(String),
    /// Processing failed for reasons the client cannot fix
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::BadRequest(detail) => {
                tracing::debug!(%detail, "rejected request");
                detail
            },
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                detail
            },
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if err.is_client_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(format!("Could not read upload: {}", err.body_text()))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
