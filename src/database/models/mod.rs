pub mod comment;

pub use comment::{Comment, CommentId, CommentRow, InvalidCommentId};
