use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::comment::{Comment, CommentId, CommentRow};
use crate::database::store::{CommentStore, StorageError};

const COLUMNS: &str = "id, slug, body, author, created_at, updated_at";

/// PostgreSQL adapter for the comment storage port
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ids above `i64::MAX` cannot exist in a BIGSERIAL column
    fn column_id(id: CommentId) -> Result<i64, StorageError> {
        i64::try_from(id.get()).map_err(|_| StorageError::NotFound)
    }

    fn into_comment(row: CommentRow) -> Result<Comment, StorageError> {
        let id = row.id;
        Comment::try_from(row)
            .map_err(|_| StorageError::Internal(format!("row carries invalid id {}", id)))
    }
}

fn map_sqlx(err: sqlx::Error) -> StorageError {
    match err {
        sqlx::Error::RowNotFound => StorageError::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            tracing::error!("Comment store unreachable: {}", err);
            StorageError::Unavailable(err.to_string())
        }
        other => {
            tracing::error!("SQLx error: {}", other);
            StorageError::Internal(other.to_string())
        }
    }
}

#[async_trait]
impl CommentStore for PgCommentRepository {
    async fn create(&self, comment: Comment) -> Result<Comment, StorageError> {
        let sql = format!(
            "INSERT INTO comments (slug, body, author) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        let row: CommentRow = sqlx::query_as(&sql)
            .bind(comment.slug)
            .bind(comment.body)
            .bind(comment.author)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Self::into_comment(row)
    }

    async fn read(&self, id: CommentId) -> Result<Comment, StorageError> {
        let sql = format!("SELECT {} FROM comments WHERE id = $1", COLUMNS);
        let row: Option<CommentRow> = sqlx::query_as(&sql)
            .bind(Self::column_id(id)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.ok_or(StorageError::NotFound).and_then(Self::into_comment)
    }

    async fn update(&self, id: CommentId, comment: Comment) -> Result<Comment, StorageError> {
        let sql = format!(
            "UPDATE comments SET slug = $2, body = $3, author = $4, updated_at = now() \
             WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        let row: Option<CommentRow> = sqlx::query_as(&sql)
            .bind(Self::column_id(id)?)
            .bind(comment.slug)
            .bind(comment.body)
            .bind(comment.author)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.ok_or(StorageError::NotFound).and_then(Self::into_comment)
    }

    async fn delete(&self, id: CommentId) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(Self::column_id(id)?)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Comment>, StorageError> {
        let sql = format!("SELECT {} FROM comments ORDER BY id", COLUMNS);
        let rows: Vec<CommentRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(Self::into_comment).collect()
    }
}
