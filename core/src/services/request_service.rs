//! Request board service.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::Request;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{RequestRepository, UserRepository};

/// Service managing "looking for an item" requests
pub struct RequestService<Q, U>
where
    Q: RequestRepository,
    U: UserRepository,
{
    request_repository: Arc<Q>,
    user_repository: Arc<U>,
}

impl<Q, U> RequestService<Q, U>
where
    Q: RequestRepository,
    U: UserRepository,
{
    /// Create a new request service
    pub fn new(request_repository: Arc<Q>, user_repository: Arc<U>) -> Self {
        Self {
            request_repository,
            user_repository,
        }
    }

    /// Submit a new request
    pub async fn create(
        &self,
        requester_id: i64,
        description: String,
        now: DateTime<Utc>,
    ) -> DomainResult<Request> {
        self.require_user(requester_id).await?;
        self.request_repository
            .create(Request::new(requester_id, description, now))
            .await
    }

    /// List the caller's own requests, newest first
    pub async fn find_own(&self, requester_id: i64) -> DomainResult<Vec<Request>> {
        self.require_user(requester_id).await?;
        self.request_repository.find_by_requester(requester_id).await
    }

    /// Fetch a request by id
    pub async fn find_by_id(&self, user_id: i64, request_id: i64) -> DomainResult<Request> {
        self.require_user(user_id).await?;
        self.request_repository
            .find_by_id(request_id)
            .await?
            .ok_or(DomainError::not_found("Request", request_id))
    }

    async fn require_user(&self, user_id: i64) -> DomainResult<()> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::not_found("User", user_id))?;
        Ok(())
    }
}
