//! Item entity: something a user offers for rent.

use serde::{Deserialize, Serialize};

/// An item listed in the catalog. Owned by exactly one user, mutated only by
/// that owner and never hard-deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, assigned by the storage layer
    pub id: i64,

    /// Short display name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Whether the item can currently be booked
    pub available: bool,

    /// Identifier of the owning user
    pub owner_id: i64,

    /// Identifier of the request this item answers, if it was listed in
    /// response to one
    pub request_id: Option<i64>,

    /// Number of completed approvals, maintained by the booking service
    pub rental_count: i32,
}

impl Item {
    /// Creates a new Item. The id is assigned when the entity is persisted.
    pub fn new(
        owner_id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        available: bool,
        request_id: Option<i64>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            available,
            owner_id,
            request_id,
            rental_count: 0,
        }
    }

    /// Case-insensitive substring match over name or description.
    /// Callers are expected to short-circuit blank search text before this.
    pub fn matches_text(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
