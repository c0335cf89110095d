pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryCommentStore;
pub use repository::PgCommentRepository;
pub use store::{CommentStore, StorageError};
