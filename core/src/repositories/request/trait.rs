//! Request repository trait for the "looking for an item" board.

use async_trait::async_trait;

use crate::domain::entities::Request;
use crate::errors::DomainResult;

/// Repository contract for Request entities
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Persist a new request, returning it with the storage-assigned id
    async fn create(&self, request: Request) -> DomainResult<Request>;

    /// Find a request by id
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Request>>;

    /// List a requester's own requests, newest first
    async fn find_by_requester(&self, requester_id: i64) -> DomainResult<Vec<Request>>;
}
