//! Comment entity: renter feedback attached to an item after a rental.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feedback left on an item. Creation is gated by the comment-eligibility
/// check: the author must have a past, approved booking of the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier, assigned by the storage layer
    pub id: i64,

    /// Identifier of the commented item
    pub item_id: i64,

    /// Identifier of the authoring user
    pub author_id: i64,

    /// Comment text
    pub text: String,

    /// When the comment was posted
    pub created: DateTime<Utc>,
}

impl Comment {
    /// Creates a new Comment. The id is assigned when the entity is persisted.
    pub fn new(
        item_id: i64,
        author_id: i64,
        text: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            item_id,
            author_id,
            text: text.into(),
            created,
        }
    }
}
