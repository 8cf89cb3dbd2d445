//! MySQL implementation of the RequestRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use si_core::domain::entities::Request;
use si_core::errors::{DomainError, DomainResult};
use si_core::repositories::RequestRepository;

/// MySQL implementation of RequestRepository
pub struct MySqlRequestRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRequestRepository {
    /// Create a new MySQL request repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Request entity
    fn row_to_request(row: &sqlx::mysql::MySqlRow) -> DomainResult<Request> {
        Ok(Request {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::database(format!("Failed to get id: {e}")))?,
            requester_id: row
                .try_get("requester_id")
                .map_err(|e| DomainError::database(format!("Failed to get requester_id: {e}")))?,
            description: row
                .try_get("description")
                .map_err(|e| DomainError::database(format!("Failed to get description: {e}")))?,
            created: row
                .try_get::<DateTime<Utc>, _>("created")
                .map_err(|e| DomainError::database(format!("Failed to get created: {e}")))?,
        })
    }
}

#[async_trait]
impl RequestRepository for MySqlRequestRepository {
    async fn create(&self, mut request: Request) -> DomainResult<Request> {
        let result =
            sqlx::query("INSERT INTO requests (requester_id, description, created) VALUES (?, ?, ?)")
                .bind(request.requester_id)
                .bind(&request.description)
                .bind(request.created)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to create request: {e}")))?;

        request.id = result.last_insert_id() as i64;
        Ok(request)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Request>> {
        let query = r#"
            SELECT id, requester_id, description, created
            FROM requests
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_request(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_requester(&self, requester_id: i64) -> DomainResult<Vec<Request>> {
        let query = r#"
            SELECT id, requester_id, description, created
            FROM requests
            WHERE requester_id = ?
            ORDER BY created DESC, id DESC
        "#;

        let rows = sqlx::query(query)
            .bind(requester_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_request).collect()
    }
}
