//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::errors::DomainResult;

/// Repository contract for User entities.
///
/// Email uniqueness is ultimately enforced at the storage boundary; the
/// service layer performs the lookup-based check so collisions surface as a
/// conflict rather than a bare database fault.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every registered user
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    /// Find a user by id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - user found
    /// * `Ok(None)` - no user with the given id
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>>;

    /// Find a user by exact (case-sensitive) email match
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Persist a new user, returning it with the storage-assigned id
    async fn create(&self, user: User) -> DomainResult<User>;

    /// Update an existing user in place
    async fn update(&self, user: User) -> DomainResult<User>;

    /// Delete a user
    ///
    /// # Returns
    /// * `Ok(true)` - user was deleted
    /// * `Ok(false)` - user not found
    async fn delete(&self, id: i64) -> DomainResult<bool>;
}
