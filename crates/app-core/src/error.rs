//! Application-wide error type and its mapping onto HTTP responses.
//!
//! Every failure leaves the service as `{ "error": "<message>" }`, with an
//! optional `details` object for field validation failures.

use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

const INTERNAL_MSG: &str = "An internal server error occurred";

/// The external system a failed write was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamTarget {
    ProfileStore,
    IdentityProvider,
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamTarget::ProfileStore => write!(f, "profile store"),
            UpstreamTarget::IdentityProvider => write!(f, "identity provider"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    ValidationStr(String),

    #[error("Invalid request format: {0}")]
    RequestFormat(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{message}")]
    UpstreamWrite { target: UpstreamTarget, message: String },

    #[error("Insert rejected: {0}")]
    DuplicateOrInsert(String),

    #[error("Request timed out")]
    RequestTimeout,

    // Third Party Libraries
    #[error("Sea ORM operation failed: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Unhandled middleware error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn profile_write(message: impl Into<String>) -> Self {
        AppError::UpstreamWrite { target: UpstreamTarget::ProfileStore, message: message.into() }
    }

    pub fn identity_write(message: impl Into<String>) -> Self {
        AppError::UpstreamWrite { target: UpstreamTarget::IdentityProvider, message: message.into() }
    }

    /// The message an upstream failure carries, without the wrapper prefix.
    pub fn upstream_message(&self) -> String {
        match self {
            AppError::Database(err) => db_message(err),
            other => other.to_string(),
        }
    }
}

/// Extracts the store's own message from a SeaORM error.
fn db_message(err: &sea_orm::DbErr) -> String {
    match err {
        sea_orm::DbErr::Exec(sea_orm::RuntimeErr::SqlxError(e)) | sea_orm::DbErr::Query(sea_orm::RuntimeErr::SqlxError(e)) => {
            match e.as_database_error() {
                Some(db_err) => db_err.message().to_string(),
                None => e.to_string(),
            }
        },
        sea_orm::DbErr::Exec(sea_orm::RuntimeErr::Internal(msg))
        | sea_orm::DbErr::Query(sea_orm::RuntimeErr::Internal(msg)) => msg.clone(),
        other => other.to_string(),
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::Validation(err) => {
                let details = json!(err.field_errors());
                (StatusCode::BAD_REQUEST, "Validation failed".to_string(), Some(details))
            },
            AppError::ValidationStr(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::RequestFormat(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::UpstreamWrite { target, message } => {
                tracing::error!(%target, "upstream write failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message, None)
            },
            AppError::DuplicateOrInsert(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::RequestTimeout => (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string(), None),

            // Third Party Libraries
            AppError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MSG.to_string(), None)
            },
            AppError::Internal(msg) => {
                tracing::error!("Unhandled middleware error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MSG.to_string(), None)
            },
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
