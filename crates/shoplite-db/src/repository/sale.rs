//! # Sale Repository
//!
//! Read-side access to persisted sale-lines. Writing sale-lines happens
//! inside the checkout workflow's transaction, not here: recording a sale
//! must decrement stock atomically with the inserts.
//!
//! ## Invoice Grouping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  sales table (one row per line)          derived invoice view       │
//! │                                                                     │
//! │  INV-20260826-041 | Sugar  | 180.00 ─┐                              │
//! │  INV-20260826-041 | Milk   |  50.00 ─┼──► Invoice INV-20260826-041  │
//! │                                      │    total 230.00              │
//! │  INV-20260826-042 | Rice   |  90.00 ─┴──► Invoice INV-20260826-042  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use shoplite_core::SaleLine;

/// Repository for sale-line reads.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Fetches every line of one invoice within a shop, in insertion
    /// order. An empty vector means no such invoice in this shop.
    pub async fn by_invoice(&self, shop_id: &str, invoice_number: &str) -> DbResult<Vec<SaleLine>> {
        debug!(shop_id = %shop_id, invoice_number = %invoice_number, "Fetching invoice lines");

        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT id, shop_id, invoice_number, customer_name, customer_phone,
                   product_id, product_name, quantity, amount_cents,
                   discount_bps, cost_price_cents, salesperson, recorded_by,
                   status, created_at
            FROM sales
            WHERE shop_id = ?1 AND invoice_number = ?2
            ORDER BY created_at, id
            "#,
        )
        .bind(shop_id)
        .bind(invoice_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Lists all sale-lines for a shop, newest first.
    pub async fn list_for_shop(&self, shop_id: &str) -> DbResult<Vec<SaleLine>> {
        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT id, shop_id, invoice_number, customer_name, customer_phone,
                   product_id, product_name, quantity, amount_cents,
                   discount_bps, cost_price_cents, salesperson, recorded_by,
                   status, created_at
            FROM sales
            WHERE shop_id = ?1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(shop_id = %shop_id, count = lines.len(), "Sale-lines listed");
        Ok(lines)
    }
}
