//! In-memory [`CommentStore`].
//!
//! Records live in a [`BTreeMap`] behind a [`RwLock`] and vanish with the
//! process. Ids come from a counter that only moves forward, so a deleted id
//! is never handed out again.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::models::comment::{Comment, CommentId};
use super::store::{CommentStore, StorageError};

struct Inner {
    comments: BTreeMap<u64, Comment>,
    next_id: u64,
}

/// Thread-safe, in-memory implementation of [`CommentStore`].
pub struct MemoryCommentStore {
    inner: RwLock<Inner>,
}

impl MemoryCommentStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                comments: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.read_lock().map(|inner| inner.comments.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<'_, Inner>, StorageError> {
        self.inner
            .read()
            .map_err(|_| StorageError::Internal("comment store lock poisoned".to_string()))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, Inner>, StorageError> {
        self.inner
            .write()
            .map_err(|_| StorageError::Internal("comment store lock poisoned".to_string()))
    }
}

impl Default for MemoryCommentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn create(&self, mut comment: Comment) -> Result<Comment, StorageError> {
        let mut inner = self.write_lock()?;
        comment.id = inner.next_id;
        inner.next_id += 1;
        inner.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn read(&self, id: CommentId) -> Result<Comment, StorageError> {
        self.read_lock()?
            .comments
            .get(&id.get())
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn update(&self, id: CommentId, mut comment: Comment) -> Result<Comment, StorageError> {
        let mut inner = self.write_lock()?;
        let slot = inner.comments.get_mut(&id.get()).ok_or(StorageError::NotFound)?;
        comment.id = id.get();
        *slot = comment.clone();
        Ok(comment)
    }

    async fn delete(&self, id: CommentId) -> Result<(), StorageError> {
        self.write_lock()?
            .comments
            .remove(&id.get())
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Comment>, StorageError> {
        Ok(self.read_lock()?.comments.values().cloned().collect())
    }
}
