//! Mock implementation of ItemRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::Item;
use crate::errors::{DomainError, DomainResult};

use super::trait_::ItemRepository;

/// In-memory item repository for testing
pub struct MockItemRepository {
    items: Arc<RwLock<HashMap<i64, Item>>>,
    next_id: AtomicI64,
}

impl MockItemRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MockItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for MockItemRepository {
    async fn create(&self, mut item: Item) -> DomainResult<Item> {
        let mut items = self.items.write().await;
        item.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, item: Item) -> DomainResult<Item> {
        let mut items = self.items.write().await;

        if !items.contains_key(&item.id) {
            return Err(DomainError::not_found("Item", item.id));
        }

        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: i64) -> DomainResult<Vec<Item>> {
        let items = self.items.read().await;
        let mut owned: Vec<Item> = items
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|i| i.id);
        Ok(owned)
    }

    async fn search(&self, text: &str) -> DomainResult<Vec<Item>> {
        let items = self.items.read().await;
        let mut found: Vec<Item> = items
            .values()
            .filter(|i| i.available && i.matches_text(text))
            .cloned()
            .collect();
        found.sort_by_key(|i| i.id);
        Ok(found)
    }

    async fn increment_rental_count(&self, item_id: i64) -> DomainResult<()> {
        let mut items = self.items.write().await;
        match items.get_mut(&item_id) {
            Some(item) => {
                item.rental_count += 1;
                Ok(())
            }
            None => Err(DomainError::not_found("Item", item_id)),
        }
    }
}
