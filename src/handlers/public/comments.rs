// handlers/public/comments.rs - read-only comment endpoints

use axum::extract::State;

use crate::app::AppState;
use crate::database::models::comment::Comment;
use crate::error::ApiError;
use crate::handlers::extract::CommentIdPath;
use crate::middleware::{ApiResult, IntoApiResponse};

/// GET /api/comment - every stored comment
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Comment>> {
    let comments = state
        .comments
        .get_all_comments()
        .await
        .map_err(|e| ApiError::from_service("Failed to retrieve all comments", e))?;

    Ok(comments.into_api_response())
}

/// GET /api/comment/:id - a single comment
pub async fn show(
    State(state): State<AppState>,
    CommentIdPath(id): CommentIdPath,
) -> ApiResult<Comment> {
    let comment = state
        .comments
        .get_comment(id)
        .await
        .map_err(|e| ApiError::from_service("Error retrieving comment by id", e))?;

    Ok(comment.into_api_response())
}
