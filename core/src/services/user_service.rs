//! User directory service.

use std::sync::Arc;

use crate::domain::entities::User;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;

/// Patch applied to an existing user; absent fields keep their value
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Service managing user registration and profile updates
pub struct UserService<U>
where
    U: UserRepository,
{
    user_repository: Arc<U>,
}

impl<U> UserService<U>
where
    U: UserRepository,
{
    /// Create a new user service
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    /// List every registered user
    pub async fn find_all(&self) -> DomainResult<Vec<User>> {
        self.user_repository.find_all().await
    }

    /// Register a new user. Fails with a conflict when the email is already
    /// bound to another user (exact, case-sensitive match).
    pub async fn create(&self, name: String, email: String) -> DomainResult<User> {
        self.ensure_email_free(&email, None).await?;
        let user = self.user_repository.create(User::new(name, email)).await?;
        tracing::debug!(user_id = user.id, "registered user");
        Ok(user)
    }

    /// Fetch a user by id
    pub async fn find_by_id(&self, user_id: i64) -> DomainResult<User> {
        self.require_user(user_id).await
    }

    /// Apply a partial update to a user
    pub async fn update(&self, user_id: i64, patch: UpdateUser) -> DomainResult<User> {
        let mut user = self.require_user(user_id).await?;

        if let Some(email) = patch.email {
            self.ensure_email_free(&email, Some(user_id)).await?;
            user.email = email;
        }
        if let Some(name) = patch.name {
            user.name = name;
        }

        self.user_repository.update(user).await
    }

    /// Delete a user by id
    pub async fn delete(&self, user_id: i64) -> DomainResult<()> {
        self.require_user(user_id).await?;
        self.user_repository.delete(user_id).await?;
        Ok(())
    }

    /// Fetch a user or fail with NotFound. Also used by the other services
    /// for caller-existence checks.
    pub async fn require_user(&self, user_id: i64) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::not_found("User", user_id))
    }

    async fn ensure_email_free(&self, email: &str, for_user: Option<i64>) -> DomainResult<()> {
        if let Some(existing) = self.user_repository.find_by_email(email).await? {
            if Some(existing.id) != for_user {
                return Err(DomainError::duplicate(format!(
                    "Email {email} is already in use"
                )));
            }
        }
        Ok(())
    }
}
