//! Custom Axum extractors that reject with [`AppError`] instead of plain text.

use axum::body::Body;
use axum::extract::{FromRequest, Json};
use axum::http::Request;
use serde::de::DeserializeOwned;

use super::error::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
