//! Comment repository trait for post-rental feedback.

use async_trait::async_trait;

use crate::domain::entities::Comment;
use crate::errors::DomainResult;

/// Repository contract for Comment entities
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment, returning it with the storage-assigned id.
    /// Eligibility is checked by the service before this is called.
    async fn create(&self, comment: Comment) -> DomainResult<Comment>;

    /// List the comments on an item, oldest first
    async fn find_by_item(&self, item_id: i64) -> DomainResult<Vec<Comment>>;
}
