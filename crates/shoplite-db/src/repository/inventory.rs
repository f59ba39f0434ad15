//! # Inventory Repository
//!
//! Database operations for the shop-scoped product catalog.
//!
//! ## Cost-Price Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Who May Write cost_price?                          │
//! │                                                                     │
//! │  Admin / Manager / Finance ──► cost_price honored as given          │
//! │  Sales                     ──► create: stored as NULL               │
//! │                                update: existing value preserved     │
//! │                                                                     │
//! │  The margin side of the business never leaks through a Sales        │
//! │  write, and a Sales edit never wipes a Manager's cost price.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use shoplite_core::{NewProduct, Product, ProductUpdate, Role};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let products = repo.list_for_shop("shop-uuid").await?;
/// let product = repo.get_in_shop("shop-uuid", "product-uuid").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products belonging to a shop, sorted by name.
    pub async fn list_for_shop(&self, shop_id: &str) -> DbResult<Vec<Product>> {
        debug!(shop_id = %shop_id, "Listing products");

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, shop_id, name, price_cents, cost_price_cents, stock,
                   discount_bps, category, unit, attachment_url,
                   created_at, updated_at
            FROM inventory
            WHERE shop_id = ?1
            ORDER BY name
            "#,
        )
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Products listed");
        Ok(products)
    }

    /// Gets a product by ID within a shop.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found in this shop
    /// * `Ok(None)` - No such product in this shop (also when the ID
    ///   exists in a different shop)
    pub async fn get_in_shop(&self, shop_id: &str, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, shop_id, name, price_cents, cost_price_cents, stock,
                   discount_bps, category, unit, attachment_url,
                   created_at, updated_at
            FROM inventory
            WHERE shop_id = ?1 AND id = ?2
            "#,
        )
        .bind(shop_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product into a shop's catalog.
    ///
    /// The cost price is only stored when the writing role may manage
    /// cost prices; otherwise NULL goes in regardless of the input.
    pub async fn create(&self, shop_id: &str, input: &NewProduct, role: Role) -> DbResult<Product> {
        debug!(shop_id = %shop_id, name = %input.name, "Inserting product");

        let cost_price_cents = if role.can_manage_cost_prices() {
            input.cost_price_cents
        } else {
            None
        };

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            shop_id: shop_id.to_string(),
            name: input.name.clone(),
            price_cents: input.price_cents,
            cost_price_cents,
            stock: input.stock,
            discount_bps: input.discount_bps,
            category: input.category.clone(),
            unit: input.unit.clone(),
            attachment_url: input.attachment_url.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO inventory (
                id, shop_id, name, price_cents, cost_price_cents, stock,
                discount_bps, category, unit, attachment_url,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&product.id)
        .bind(&product.shop_id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.cost_price_cents)
        .bind(product.stock)
        .bind(product.discount_bps)
        .bind(&product.category)
        .bind(&product.unit)
        .bind(&product.attachment_url)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Updates a product in place.
    ///
    /// For roles that may not manage cost prices the stored cost price is
    /// preserved, whatever the input carries.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - No such product in this shop
    pub async fn update(
        &self,
        shop_id: &str,
        id: &str,
        input: &ProductUpdate,
        role: Role,
    ) -> DbResult<()> {
        debug!(shop_id = %shop_id, id = %id, "Updating product");

        let now = Utc::now();

        let result = if role.can_manage_cost_prices() {
            sqlx::query(
                r#"
                UPDATE inventory SET
                    name = ?3,
                    price_cents = ?4,
                    cost_price_cents = ?5,
                    stock = ?6,
                    discount_bps = ?7,
                    category = ?8,
                    unit = ?9,
                    attachment_url = ?10,
                    updated_at = ?11
                WHERE shop_id = ?1 AND id = ?2
                "#,
            )
            .bind(shop_id)
            .bind(id)
            .bind(&input.name)
            .bind(input.price_cents)
            .bind(input.cost_price_cents)
            .bind(input.stock)
            .bind(input.discount_bps)
            .bind(&input.category)
            .bind(&input.unit)
            .bind(&input.attachment_url)
            .bind(now)
            .execute(&self.pool)
            .await?
        } else {
            // cost_price_cents deliberately untouched
            sqlx::query(
                r#"
                UPDATE inventory SET
                    name = ?3,
                    price_cents = ?4,
                    stock = ?5,
                    discount_bps = ?6,
                    category = ?7,
                    unit = ?8,
                    attachment_url = ?9,
                    updated_at = ?10
                WHERE shop_id = ?1 AND id = ?2
                "#,
            )
            .bind(shop_id)
            .bind(id)
            .bind(&input.name)
            .bind(input.price_cents)
            .bind(input.stock)
            .bind(input.discount_bps)
            .bind(&input.category)
            .bind(&input.unit)
            .bind(&input.attachment_url)
            .bind(now)
            .execute(&self.pool)
            .await?
        };

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product from the catalog.
    ///
    /// Historical sale-lines keep their frozen snapshot of the product
    /// name and prices, so deletion never rewrites sales history.
    pub async fn delete(&self, shop_id: &str, id: &str) -> DbResult<()> {
        debug!(shop_id = %shop_id, id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM inventory WHERE shop_id = ?1 AND id = ?2")
            .bind(shop_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Adjusts stock by a delta (positive restock, negative write-off).
    ///
    /// Refuses adjustments that would take stock below zero.
    ///
    /// ## Returns
    /// * `Err(DbError::StockConflict)` - The product exists but the delta
    ///   would go negative
    /// * `Err(DbError::NotFound)` - No such product in this shop
    pub async fn adjust_stock(&self, shop_id: &str, id: &str, delta: i64) -> DbResult<()> {
        debug!(shop_id = %shop_id, id = %id, delta = %delta, "Adjusting stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET stock = stock + ?3, updated_at = ?4
            WHERE shop_id = ?1 AND id = ?2 AND stock + ?3 >= 0
            "#,
        )
        .bind(shop_id)
        .bind(id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // 0 rows is either a missing product or a blocked guard;
            // re-read to tell the caller which.
            let available: Option<i64> =
                sqlx::query_scalar("SELECT stock FROM inventory WHERE shop_id = ?1 AND id = ?2")
                    .bind(shop_id)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;

            return Err(match available {
                Some(available) => DbError::StockConflict {
                    id: id.to_string(),
                    available,
                    delta,
                },
                None => DbError::not_found("Product", id),
            });
        }

        Ok(())
    }

    /// Counts products in a shop (for diagnostics).
    pub async fn count_for_shop(&self, shop_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory WHERE shop_id = ?1")
            .bind(shop_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{seed_shop, test_db};

    fn input(name: &str, cost: Option<i64>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price_cents: 10000,
            cost_price_cents: cost,
            stock: 5,
            discount_bps: 0,
            category: "Food".to_string(),
            unit: "Piece".to_string(),
            attachment_url: None,
        }
    }

    #[tokio::test]
    async fn test_sales_role_create_drops_cost_price() {
        let db = test_db().await;
        let ctx = seed_shop(&db).await;
        let shop_id = ctx.shop_id.unwrap();

        let by_sales = db
            .products()
            .create(&shop_id, &input("Rice 5kg", Some(6000)), Role::Sales)
            .await
            .unwrap();
        assert_eq!(by_sales.cost_price_cents, None);

        let by_manager = db
            .products()
            .create(&shop_id, &input("Sugar 1kg", Some(1200)), Role::Manager)
            .await
            .unwrap();
        assert_eq!(by_manager.cost_price_cents, Some(1200));
    }

    #[tokio::test]
    async fn test_sales_role_update_preserves_cost_price() {
        let db = test_db().await;
        let ctx = seed_shop(&db).await;
        let shop_id = ctx.shop_id.unwrap();

        let product = db
            .products()
            .create(&shop_id, &input("Rice 5kg", Some(6000)), Role::Finance)
            .await
            .unwrap();

        let mut update = ProductUpdate {
            name: "Rice 5kg".to_string(),
            price_cents: 11000,
            cost_price_cents: None, // a Sales write never carries cost
            stock: 5,
            discount_bps: 0,
            category: "Food".to_string(),
            unit: "Piece".to_string(),
            attachment_url: None,
        };
        db.products()
            .update(&shop_id, &product.id, &update, Role::Sales)
            .await
            .unwrap();

        let stored = db
            .products()
            .get_in_shop(&shop_id, &product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.price_cents, 11000);
        assert_eq!(stored.cost_price_cents, Some(6000));

        // a Finance write may change it
        update.cost_price_cents = Some(7000);
        db.products()
            .update(&shop_id, &product.id, &update, Role::Finance)
            .await
            .unwrap();
        let stored = db
            .products()
            .get_in_shop(&shop_id, &product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.cost_price_cents, Some(7000));
    }

    #[tokio::test]
    async fn test_products_are_shop_scoped() {
        let db = test_db().await;
        let ctx = seed_shop(&db).await;
        let other = seed_shop(&db).await;
        let shop_id = ctx.shop_id.unwrap();

        let product = db
            .products()
            .create(&shop_id, &input("Rice 5kg", None), Role::Manager)
            .await
            .unwrap();

        let visible = db
            .products()
            .get_in_shop(&other.shop_id.unwrap(), &product.id)
            .await
            .unwrap();
        assert!(visible.is_none());
    }

    #[tokio::test]
    async fn test_adjust_stock_refuses_negative() {
        let db = test_db().await;
        let ctx = seed_shop(&db).await;
        let shop_id = ctx.shop_id.unwrap();

        let product = db
            .products()
            .create(&shop_id, &input("Rice 5kg", None), Role::Manager)
            .await
            .unwrap();

        db.products().adjust_stock(&shop_id, &product.id, 10).await.unwrap();
        db.products().adjust_stock(&shop_id, &product.id, -3).await.unwrap();

        let stored = db
            .products()
            .get_in_shop(&shop_id, &product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.stock, 12);

        // would go to -1: the product exists, so this is a conflict,
        // not a missing row
        let err = db
            .products()
            .adjust_stock(&shop_id, &product.id, -13)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::StockConflict {
                available: 12,
                delta: -13,
                ..
            }
        ));

        // and the blocked write left stock alone
        let stored = db
            .products()
            .get_in_shop(&shop_id, &product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.stock, 12);

        let err = db
            .products()
            .adjust_stock(&shop_id, "missing", -1)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let db = test_db().await;
        let ctx = seed_shop(&db).await;
        let shop_id = ctx.shop_id.unwrap();

        let err = db.products().delete(&shop_id, "missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let db = test_db().await;
        let ctx = seed_shop(&db).await;
        let shop_id = ctx.shop_id.unwrap();

        for name in ["Sugar 1kg", "Gari 2kg", "Rice 5kg"] {
            db.products()
                .create(&shop_id, &input(name, None), Role::Manager)
                .await
                .unwrap();
        }

        let names: Vec<String> = db
            .products()
            .list_for_shop(&shop_id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Gari 2kg", "Rice 5kg", "Sugar 1kg"]);

        assert_eq!(db.products().count_for_shop(&shop_id).await.unwrap(), 3);
    }
}
