// handlers/extract.rs - Extractors that reject with the error envelope
//
// axum's stock `Path` and `Json` rejections answer in plain text; these
// wrappers turn the same failures into `ApiError::BadRequest`.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
};
use serde::de::DeserializeOwned;

use crate::database::models::comment::CommentId;
use crate::error::ApiError;

/// The `:id` path segment, parsed as a positive comment id
#[derive(Debug, Clone, Copy)]
pub struct CommentIdPath(pub CommentId);

#[async_trait]
impl<S> FromRequestParts<S> for CommentIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request("Unable to parse UINT from ID", e.body_text()))?;

        raw.parse::<CommentId>()
            .map(CommentIdPath)
            .map_err(|e| ApiError::bad_request("Unable to parse UINT from ID", e))
    }
}

/// JSON request body. The body is decoded whatever `Content-Type` says.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::payload_too_large("Request body too large", e.body_text())
            } else {
                ApiError::bad_request("Failed to decode JSON body", e.body_text())
            }
        })?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::bad_request("Failed to decode JSON body", e))
    }
}
