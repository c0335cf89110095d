// handlers/protected/comments.rs - mutating comment endpoints
//
// Mounted behind `middleware::protect`, so the `Principal` extension is
// always present by the time these run.

use axum::{extract::State, Extension};

use crate::api::MessageResponse;
use crate::app::AppState;
use crate::auth::Principal;
use crate::database::models::comment::Comment;
use crate::error::ApiError;
use crate::handlers::extract::{CommentIdPath, JsonBody};
use crate::middleware::{ApiResult, IntoApiResponse};

/// POST /api/comment - create a comment; any `id` in the body is ignored
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(draft): JsonBody<Comment>,
) -> ApiResult<Comment> {
    let comment = state
        .comments
        .post_comment(draft)
        .await
        .map_err(|e| ApiError::from_service("Failed to post new comment", e))?;

    tracing::info!("Comment {} created by {}", comment.id, principal.subject);
    Ok(comment.into_api_response())
}

/// PUT /api/comment/:id - update a comment; the path id wins over the body id
pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    id: Result<CommentIdPath, ApiError>,
    JsonBody(patch): JsonBody<Comment>,
) -> ApiResult<Comment> {
    // The body is decoded before the id is checked
    let CommentIdPath(id) = id?;
    let comment = state
        .comments
        .update_comment(id, patch)
        .await
        .map_err(|e| ApiError::from_service("Failed to update comment", e))?;

    tracing::info!("Comment {} updated by {}", id, principal.subject);
    Ok(comment.into_api_response())
}

/// DELETE /api/comment/:id - permanently remove a comment
pub async fn remove(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    CommentIdPath(id): CommentIdPath,
) -> ApiResult<MessageResponse> {
    state
        .comments
        .delete_comment(id)
        .await
        .map_err(|e| ApiError::from_service("Failed to delete comment by comment ID", e))?;

    tracing::info!("Comment {} deleted by {}", id, principal.subject);
    Ok(MessageResponse::new("Comment successfully deleted").into_api_response())
}
