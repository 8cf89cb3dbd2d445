//! Read models for the item detail view.
//!
//! Comments carry only the author's id; the service resolves author names
//! through the user repository when assembling the view, so there is no
//! bidirectional entity graph to keep consistent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Comment, Item};

/// A comment joined with its author's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDetails {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl CommentDetails {
    pub fn new(comment: Comment, author_name: impl Into<String>) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_name: author_name.into(),
            created: comment.created,
        }
    }
}

/// An item together with the feedback left on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub item: Item,
    pub comments: Vec<CommentDetails>,
}
