//! Item repository trait defining the interface for catalog persistence.

use async_trait::async_trait;

use crate::domain::entities::Item;
use crate::errors::DomainResult;

/// Repository contract for Item entities
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item, returning it with the storage-assigned id
    async fn create(&self, item: Item) -> DomainResult<Item>;

    /// Update an existing item in place
    async fn update(&self, item: Item) -> DomainResult<Item>;

    /// Find an item by id
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Item>>;

    /// List the items owned by a user, ordered by id ascending
    async fn find_by_owner(&self, owner_id: i64) -> DomainResult<Vec<Item>>;

    /// Case-insensitive substring search over name and description,
    /// restricted to available items. Callers short-circuit blank text;
    /// implementations may assume `text` is non-blank.
    async fn search(&self, text: &str) -> DomainResult<Vec<Item>>;

    /// Atomically bump the rental counter of an item
    async fn increment_rental_count(&self, item_id: i64) -> DomainResult<()>;
}
