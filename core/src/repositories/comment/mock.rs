//! Mock implementation of CommentRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::Comment;
use crate::errors::DomainResult;

use super::trait_::CommentRepository;

/// In-memory comment repository for testing
pub struct MockCommentRepository {
    comments: Arc<RwLock<HashMap<i64, Comment>>>,
    next_id: AtomicI64,
}

impl MockCommentRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            comments: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MockCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentRepository for MockCommentRepository {
    async fn create(&self, mut comment: Comment) -> DomainResult<Comment> {
        let mut comments = self.comments.write().await;
        comment.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_by_item(&self, item_id: i64) -> DomainResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        let mut on_item: Vec<Comment> = comments
            .values()
            .filter(|c| c.item_id == item_id)
            .cloned()
            .collect();
        on_item.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        Ok(on_item)
    }
}
