use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use si_core::domain::entities::Item;
use si_core::domain::value_objects::{CommentDetails, ItemDetails};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewItemDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 1000))]
    pub description: String,

    /// Whether the item can currently be booked
    pub available: bool,

    /// Request this listing answers, if any
    pub request_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateItemDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 1000))]
    pub description: Option<String>,

    pub available: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewCommentDto {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
    pub rental_count: i32,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
            rental_count: item.rental_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl From<CommentDetails> for CommentDto {
    fn from(details: CommentDetails) -> Self {
        Self {
            id: details.id,
            text: details.text,
            author_name: details.author_name,
            created: details.created,
        }
    }
}

/// Item detail view: the item's own fields plus its comments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDetailsDto {
    #[serde(flatten)]
    pub item: ItemDto,
    pub comments: Vec<CommentDto>,
}

impl From<ItemDetails> for ItemDetailsDto {
    fn from(details: ItemDetails) -> Self {
        Self {
            item: details.item.into(),
            comments: details.comments.into_iter().map(Into::into).collect(),
        }
    }
}
