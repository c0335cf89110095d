// database/store.rs - Storage port consumed by the comment service
//
// The service layer only ever talks to `dyn CommentStore`. Adapters:
//   MemoryCommentStore   - tests and local development
//   PgCommentRepository  - PostgreSQL via sqlx

use std::time::Duration;

use async_trait::async_trait;

use crate::database::models::comment::{Comment, CommentId};

/// Errors a storage adapter may surface.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No record carries the requested id.
    #[error("record not found")]
    NotFound,

    /// The backing store could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete within the storage deadline.
    #[error("storage call timed out after {0:?}")]
    Timeout(Duration),

    /// Anything else the backend reports.
    #[error("internal storage error: {0}")]
    Internal(String),
}

/// Record-level CRUD for comments.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Persist a new record and return it with its assigned id.
    /// The `id` of the argument is ignored.
    async fn create(&self, comment: Comment) -> Result<Comment, StorageError>;

    async fn read(&self, id: CommentId) -> Result<Comment, StorageError>;

    /// Replace the attributes of `id`, returning the stored record.
    async fn update(&self, id: CommentId, comment: Comment) -> Result<Comment, StorageError>;

    async fn delete(&self, id: CommentId) -> Result<(), StorageError>;

    /// Every record in ascending id order.
    async fn list(&self) -> Result<Vec<Comment>, StorageError>;
}
