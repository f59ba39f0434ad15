//! # Shop Repository
//!
//! Database operations for shops, the tenant boundary every business
//! document hangs off.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use shoplite_core::Shop;

/// Repository for shop database operations.
#[derive(Debug, Clone)]
pub struct ShopRepository {
    pool: SqlitePool,
}

impl ShopRepository {
    /// Creates a new ShopRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShopRepository { pool }
    }

    /// Inserts a new shop.
    pub async fn insert(&self, shop: &Shop) -> DbResult<()> {
        debug!(shop_id = %shop.id, name = %shop.name, "Inserting shop");

        sqlx::query(
            r#"
            INSERT INTO shops (id, name, owner_id, location, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&shop.id)
        .bind(&shop.name)
        .bind(&shop.owner_id)
        .bind(&shop.location)
        .bind(shop.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a shop by ID.
    pub async fn get(&self, id: &str) -> DbResult<Option<Shop>> {
        let shop = sqlx::query_as::<_, Shop>(
            "SELECT id, name, owner_id, location, created_at FROM shops WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shop)
    }

    /// Lists all shops, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Shop>> {
        let shops = sqlx::query_as::<_, Shop>(
            "SELECT id, name, owner_id, location, created_at FROM shops ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(shops)
    }
}
