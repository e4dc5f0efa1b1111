use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt::Display;
use taskcache_domain::DomainError;
use tracing::warn;

use crate::dto::{ErrorResponse, Message};

/// Failure of an API request, already classified for the client.
#[derive(Debug)]
pub enum ApiError {
    /// The `{id}` path segment is not an integer.
    InvalidId(String),
    /// No todo with this id.
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    /// Classifies a storage error for the request on todo `id`.
    pub fn for_task(err: DomainError, id: impl Display) -> Self {
        match err {
            DomainError::NotFound(_) => Self::NotFound(id.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let response = match &self {
            Self::InvalidId(id) => (
                StatusCode::BAD_REQUEST,
                Json(Message::new(
                    "invalid! id must be integer",
                    format!("todo id: {}", id),
                )),
            )
                .into_response(),
            Self::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(Message::new("todo not found", format!("todo id: {}", id))),
            )
                .into_response(),
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: msg.clone() }),
            )
                .into_response(),
            Self::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: msg.clone() }),
            )
                .into_response(),
        };

        warn!(status = %response.status(), error = ?self, "Request failed");
        response
    }
}
