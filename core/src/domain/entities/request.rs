//! Request entity: a renter's ask for an item not yet in the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A "looking for an item" request submitted by a renter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Unique identifier, assigned by the storage layer
    pub id: i64,

    /// Identifier of the requesting user
    pub requester_id: i64,

    /// What the requester is looking for
    pub description: String,

    /// When the request was submitted
    pub created: DateTime<Utc>,
}

impl Request {
    /// Creates a new Request. The id is assigned when the entity is persisted.
    pub fn new(requester_id: i64, description: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            requester_id,
            description: description.into(),
            created,
        }
    }
}
