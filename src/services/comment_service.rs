use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::database::models::comment::{Comment, CommentId};
use crate::database::store::{CommentStore, StorageError};

/// Failures the comment service reports to the transport layer
#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    #[error("comment {0} not found")]
    NotFound(CommentId),

    #[error(transparent)]
    Storage(StorageError),
}

/// CRUD contract for comments on top of any [`CommentStore`].
///
/// Every storage call is bounded by `timeout`; a call that exceeds it is
/// reported as a storage failure.
pub struct CommentService {
    store: Arc<dyn CommentStore>,
    timeout: Duration,
}

impl CommentService {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(store: Arc<dyn CommentStore>) -> Self {
        Self {
            store,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn get_all_comments(&self) -> Result<Vec<Comment>, CommentError> {
        self.bounded(self.store.list()).await.map_err(CommentError::Storage)
    }

    pub async fn get_comment(&self, id: CommentId) -> Result<Comment, CommentError> {
        self.bounded(self.store.read(id))
            .await
            .map_err(|e| not_found_or_storage(id, e))
    }

    /// Persist `draft` and return it with the id storage assigned. Any id the
    /// caller supplied is discarded.
    pub async fn post_comment(&self, mut draft: Comment) -> Result<Comment, CommentError> {
        draft.id = 0;
        let created = self
            .bounded(self.store.create(draft))
            .await
            .map_err(CommentError::Storage)?;
        tracing::debug!("Created comment {}", created.id);
        Ok(created)
    }

    /// Merge `patch` into the existing record stored under `id`.
    pub async fn update_comment(&self, id: CommentId, patch: Comment) -> Result<Comment, CommentError> {
        let mut current = self.get_comment(id).await?;
        current.apply(patch);
        current.id = id.get();

        self.bounded(self.store.update(id, current))
            .await
            .map_err(|e| not_found_or_storage(id, e))
    }

    pub async fn delete_comment(&self, id: CommentId) -> Result<(), CommentError> {
        self.bounded(self.store.delete(id))
            .await
            .map_err(|e| not_found_or_storage(id, e))?;
        tracing::debug!("Deleted comment {}", id);
        Ok(())
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("Storage call exceeded {:?}", self.timeout);
                Err(StorageError::Timeout(self.timeout))
            }
        }
    }
}

fn not_found_or_storage(id: CommentId, err: StorageError) -> CommentError {
    match err {
        StorageError::NotFound => CommentError::NotFound(id),
        other => CommentError::Storage(other),
    }
}
