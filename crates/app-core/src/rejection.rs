//! Conversions from Axum's extractor rejections into [`AppError`].

use axum::extract::rejection::JsonRejection;

use super::error::AppError;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::RequestFormat(rejection.body_text())
    }
}
