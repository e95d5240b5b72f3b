pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::error::AppError;
use crate::models::{Comment, NewComment, Post, PostFields};
use async_trait::async_trait;

/// Storage seam behind the handlers. One implementation persists to
/// Postgres, the other holds everything in memory; both expose the same
/// post lifecycle and comment operations.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert a post from a partial field set. At least one field must be
    /// present; the generated identity and server-assigned columns come
    /// back on the returned record.
    async fn create_post(&self, fields: PostFields) -> Result<Post, AppError>;

    /// All posts, storage-defined order.
    async fn list_posts(&self) -> Result<Vec<Post>, AppError>;

    async fn get_post(&self, id: i64) -> Result<Post, AppError>;

    /// Partial merge keyed by identity, then the refreshed record. A
    /// missing identity surfaces as `NotFound` from the refresh lookup.
    async fn update_post(&self, id: i64, fields: PostFields) -> Result<Post, AppError>;

    /// Unconditional delete; succeeds even when the row was already gone.
    async fn delete_post(&self, id: i64) -> Result<(), AppError>;

    /// Comments for a post; `NotFound` if the post does not exist.
    async fn comments(&self, post_id: i64) -> Result<Vec<Comment>, AppError>;

    async fn add_comment(&self, post_id: i64, new: NewComment) -> Result<Comment, AppError>;

    /// Remove one comment from a post. Removing an absent comment succeeds;
    /// an absent post is `NotFound`.
    async fn remove_comment(&self, post_id: i64, comment_id: i64) -> Result<(), AppError>;
}
