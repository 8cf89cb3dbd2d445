//! Mock implementation of RequestRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::Request;
use crate::errors::DomainResult;

use super::trait_::RequestRepository;

/// In-memory request repository for testing
pub struct MockRequestRepository {
    requests: Arc<RwLock<HashMap<i64, Request>>>,
    next_id: AtomicI64,
}

impl MockRequestRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MockRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestRepository for MockRequestRepository {
    async fn create(&self, mut request: Request) -> DomainResult<Request> {
        let mut requests = self.requests.write().await;
        request.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Request>> {
        let requests = self.requests.read().await;
        Ok(requests.get(&id).cloned())
    }

    async fn find_by_requester(&self, requester_id: i64) -> DomainResult<Vec<Request>> {
        let requests = self.requests.read().await;
        let mut own: Vec<Request> = requests
            .values()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect();
        own.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        Ok(own)
    }
}
