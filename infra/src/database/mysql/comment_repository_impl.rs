//! MySQL implementation of the CommentRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use si_core::domain::entities::Comment;
use si_core::errors::{DomainError, DomainResult};
use si_core::repositories::CommentRepository;

/// MySQL implementation of CommentRepository
pub struct MySqlCommentRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCommentRepository {
    /// Create a new MySQL comment repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Comment entity
    fn row_to_comment(row: &sqlx::mysql::MySqlRow) -> DomainResult<Comment> {
        Ok(Comment {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::database(format!("Failed to get id: {e}")))?,
            item_id: row
                .try_get("item_id")
                .map_err(|e| DomainError::database(format!("Failed to get item_id: {e}")))?,
            author_id: row
                .try_get("author_id")
                .map_err(|e| DomainError::database(format!("Failed to get author_id: {e}")))?,
            text: row
                .try_get("text")
                .map_err(|e| DomainError::database(format!("Failed to get text: {e}")))?,
            created: row
                .try_get::<DateTime<Utc>, _>("created")
                .map_err(|e| DomainError::database(format!("Failed to get created: {e}")))?,
        })
    }
}

#[async_trait]
impl CommentRepository for MySqlCommentRepository {
    async fn create(&self, mut comment: Comment) -> DomainResult<Comment> {
        let result = sqlx::query(
            "INSERT INTO comments (item_id, author_id, text, created) VALUES (?, ?, ?, ?)",
        )
        .bind(comment.item_id)
        .bind(comment.author_id)
        .bind(&comment.text)
        .bind(comment.created)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create comment: {e}")))?;

        comment.id = result.last_insert_id() as i64;
        Ok(comment)
    }

    async fn find_by_item(&self, item_id: i64) -> DomainResult<Vec<Comment>> {
        let query = r#"
            SELECT id, item_id, author_id, text, created
            FROM comments
            WHERE item_id = ?
            ORDER BY created, id
        "#;

        let rows = sqlx::query(query)
            .bind(item_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_comment).collect()
    }
}
