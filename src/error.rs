use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::booking::alternatives::BookingSuggestion;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Requested seats are held by another confirmed booking. Carries the
    /// offending seat ids and, for best-effort requests, ranked alternatives.
    #[error("{message}")]
    SeatsUnavailable {
        message: String,
        unavailable_seat_ids: Vec<i32>,
        alternatives: Vec<BookingSuggestion>,
    },

    /// No consecutive block of the requested size exists for the show.
    #[error("{message}")]
    NoConsecutiveBlock {
        message: String,
        alternatives: Vec<BookingSuggestion>,
    },

    /// Lost a commit race or exhausted reference generation. Nothing was
    /// persisted; the whole request is safe to retry.
    #[error("{0}")]
    Transient(String),

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "validation",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::SeatsUnavailable { .. } => "seats_unavailable",
            AppError::NoConsecutiveBlock { .. } => "no_consecutive_block",
            AppError::Transient(_) => "transient",
            AppError::Internal(_) => "internal",
            AppError::Database(_) => "database",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::SeatsUnavailable { .. } => StatusCode::CONFLICT,
            AppError::NoConsecutiveBlock { .. } => StatusCode::CONFLICT,
            AppError::Transient(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "request failed: {}", self);
        }

        let mut body = json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });

        match &self {
            AppError::SeatsUnavailable {
                unavailable_seat_ids,
                alternatives,
                ..
            } => {
                body["unavailable_seat_ids"] = json!(unavailable_seat_ids);
                body["alternatives"] = json!(alternatives);
            }
            AppError::NoConsecutiveBlock { alternatives, .. } => {
                body["alternatives"] = json!(alternatives);
            }
            _ => {}
        }

        (status, Json(json!({ "error": body }))).into_response()
    }
}
