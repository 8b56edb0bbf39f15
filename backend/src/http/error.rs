//! HTTP error handling and response types.
//!
//! Every failure leaves the API as `{"error": "..."}`, plus `fields` for
//! validation errors. Upstream failures are logged in full and answered with
//! a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::IdentityError;
use crate::db::repository::RepositoryError;
use crate::models::InvalidFields;

/// Message returned for any failure the caller cannot act on.
pub const UPSTREAM_MESSAGE: &str = "Internal server error";

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed input (400).
    Validation { message: String, fields: Vec<String> },
    /// No valid bearer token (401).
    Unauthenticated(String),
    /// Absent, or owned by another tenant (404).
    NotFound(String),
    /// Duplicate enrollment or account, refused seed (409).
    Conflict(String),
    /// Store or provider failure (500). The cause is logged, not returned.
    Upstream(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation { message, fields } => ApiError {
                error: message,
                fields,
            },
            AppError::Unauthenticated(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => ApiError {
                error: message,
                fields: Vec::new(),
            },
            AppError::Upstream(cause) => {
                tracing::error!(%cause, "request failed upstream");
                ApiError {
                    error: UPSTREAM_MESSAGE.to_string(),
                    fields: Vec::new(),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ValidationError { message, context } => AppError::Validation {
                message,
                fields: context.fields,
            },
            RepositoryError::NotFound { message, .. } => AppError::NotFound(message),
            RepositoryError::Conflict { message, .. } => AppError::Conflict(message),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl From<InvalidFields> for AppError {
    fn from(err: InvalidFields) -> Self {
        AppError::Validation {
            message: err.message,
            fields: err.fields,
        }
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Validation { message, fields } => {
                AppError::Validation { message, fields }
            }
            IdentityError::AccountExists => AppError::Conflict(err.to_string()),
            IdentityError::InvalidCredentials | IdentityError::InvalidToken => {
                AppError::Unauthenticated(err.to_string())
            }
            IdentityError::Internal(_) => AppError::Upstream(err.to_string()),
        }
    }
}
