//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use si_core::domain::entities::User;
use si_core::errors::{DomainError, DomainResult};
use si_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> DomainResult<User> {
        Ok(User {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::database(format!("Failed to get id: {e}")))?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::database(format!("Failed to get name: {e}")))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::database(format!("Failed to get email: {e}")))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let rows = sqlx::query("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let result = sqlx::query("SELECT id, name, email FROM users WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        // BINARY forces a case-sensitive comparison regardless of collation
        let result =
            sqlx::query("SELECT id, name, email FROM users WHERE BINARY email = ? LIMIT 1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, mut user: User) -> DomainResult<User> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(&user.name)
            .bind(&user.email)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_unique_violation() => DomainError::duplicate(format!(
                    "Email {} is already in use",
                    user.email
                )),
                _ => DomainError::database(format!("Failed to create user: {e}")),
            })?;

        user.id = result.last_insert_id() as i64;
        Ok(user)
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        let result = sqlx::query("UPDATE users SET name = ?, email = ? WHERE id = ?")
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_unique_violation() => DomainError::duplicate(format!(
                    "Email {} is already in use",
                    user.email
                )),
                _ => DomainError::database(format!("Failed to update user: {e}")),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User", user.id));
        }

        Ok(user)
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete user: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
