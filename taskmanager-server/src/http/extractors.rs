//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Form;
use serde::de::DeserializeOwned;

use super::error::AppError;
use crate::models::RecordId;

/// Extract a numeric record id from the path.
///
/// A segment that is not an integer cannot name any record, so it is
/// reported as not found rather than as a bad request.
pub struct RecordIdPath(pub RecordId);

impl<S> FromRequestParts<S> for RecordIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound {
                resource: "page",
                id: parts.uri.path().to_owned(),
            })?;

        let id = raw.parse().map_err(|_| AppError::NotFound {
            resource: "record",
            id: raw.clone(),
        })?;

        Ok(Self(id))
    }
}

/// Urlencoded form body whose rejections render as HTML error pages.
pub struct FormBody<T>(pub T);

impl<T, S> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
