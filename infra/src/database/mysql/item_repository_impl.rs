//! MySQL implementation of the ItemRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use si_core::domain::entities::Item;
use si_core::errors::{DomainError, DomainResult};
use si_core::repositories::ItemRepository;

const ITEM_COLUMNS: &str = "id, name, description, available, owner_id, request_id, rental_count";

/// MySQL implementation of ItemRepository
pub struct MySqlItemRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlItemRepository {
    /// Create a new MySQL item repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Item entity
    fn row_to_item(row: &sqlx::mysql::MySqlRow) -> DomainResult<Item> {
        Ok(Item {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::database(format!("Failed to get id: {e}")))?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::database(format!("Failed to get name: {e}")))?,
            description: row
                .try_get("description")
                .map_err(|e| DomainError::database(format!("Failed to get description: {e}")))?,
            available: row
                .try_get("available")
                .map_err(|e| DomainError::database(format!("Failed to get available: {e}")))?,
            owner_id: row
                .try_get("owner_id")
                .map_err(|e| DomainError::database(format!("Failed to get owner_id: {e}")))?,
            request_id: row
                .try_get("request_id")
                .map_err(|e| DomainError::database(format!("Failed to get request_id: {e}")))?,
            rental_count: row
                .try_get("rental_count")
                .map_err(|e| DomainError::database(format!("Failed to get rental_count: {e}")))?,
        })
    }

    /// Escape LIKE metacharacters so the search text matches as a literal
    /// substring.
    fn escape_like(text: &str) -> String {
        text.replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    }
}

#[async_trait]
impl ItemRepository for MySqlItemRepository {
    async fn create(&self, mut item: Item) -> DomainResult<Item> {
        let query = r#"
            INSERT INTO items (name, description, available, owner_id, request_id, rental_count)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.available)
            .bind(item.owner_id)
            .bind(item.request_id)
            .bind(item.rental_count)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to create item: {e}")))?;

        item.id = result.last_insert_id() as i64;
        Ok(item)
    }

    async fn update(&self, item: Item) -> DomainResult<Item> {
        let query = r#"
            UPDATE items
            SET name = ?, description = ?, available = ?, request_id = ?, rental_count = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.available)
            .bind(item.request_id)
            .bind(item.rental_count)
            .bind(item.id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update item: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Item", item.id));
        }

        Ok(item)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Item>> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_item(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_owner(&self, owner_id: i64) -> DomainResult<Vec<Item>> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM items WHERE owner_id = ? ORDER BY id");

        let rows = sqlx::query(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn search(&self, text: &str) -> DomainResult<Vec<Item>> {
        let query = format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM items
            WHERE available = TRUE
              AND (LOWER(name) LIKE CONCAT('%', LOWER(?), '%') ESCAPE '\\'
                   OR LOWER(description) LIKE CONCAT('%', LOWER(?), '%') ESCAPE '\\')
            ORDER BY id
            "#
        );

        let pattern = Self::escape_like(text);
        let rows = sqlx::query(&query)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn increment_rental_count(&self, item_id: i64) -> DomainResult<()> {
        let result =
            sqlx::query("UPDATE items SET rental_count = rental_count + 1 WHERE id = ?")
                .bind(item_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to update rental count: {e}"))
                })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Item", item_id));
        }

        Ok(())
    }
}
